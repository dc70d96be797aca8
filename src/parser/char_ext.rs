//! Character classes of the expression grammar.
pub trait CharExt {
    /// May start a variable name.
    fn is_variable_start(&self) -> bool;

    /// May continue a variable name after its first letter.
    fn is_variable_continuation(&self) -> bool;

    /// May appear in a numeric constant.
    fn is_numeric_constant(&self) -> bool;

    /// May appear between the quotes of a char constant.
    fn is_char_constant_body(&self) -> bool {
        self.is_variable_start() || self.is_numeric_digit()
    }

    fn is_numeric_digit(&self) -> bool;
}
impl CharExt for char {
    fn is_variable_start(&self) -> bool {
        self.is_alphabetic()
    }

    fn is_variable_continuation(&self) -> bool {
        self.is_alphanumeric() || *self == '_'
    }

    fn is_numeric_constant(&self) -> bool {
        self.is_numeric_digit() || *self == '.'
    }

    fn is_numeric_digit(&self) -> bool {
        self.is_ascii_digit()
    }
}
