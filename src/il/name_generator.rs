use super::Temp;

/// Hands out temporaries for a single parse, starting at `^1`.
pub struct NameGenerator {
    index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Generates a new unique temporary.
    pub fn next_temp(&mut self) -> Temp {
        self.index += 1;
        Temp(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_temp_generates_ascending_temp_values() {
        let mut name_gen = NameGenerator::new();

        assert_eq!("^1", name_gen.next_temp().to_string());
        assert_eq!("^2", name_gen.next_temp().to_string());
    }

    #[test]
    fn generators_do_not_share_state() {
        let mut first = NameGenerator::new();
        let mut second = NameGenerator::new();

        first.next_temp();
        first.next_temp();

        assert_eq!(Temp(1), second.next_temp());
        assert_eq!(Temp(3), first.next_temp());
    }
}
