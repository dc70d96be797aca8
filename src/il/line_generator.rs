/// Hands out line numbers for a single parse, starting at 1.
pub struct LineGenerator {
    line: usize,
}
impl LineGenerator {
    pub fn new() -> Self {
        Self { line: 0 }
    }

    /// Generates the line number of the next triad.
    pub fn next_line(&mut self) -> usize {
        self.line += 1;
        self.line
    }
}
