use crate::span::Span;

/// An error that can be traced back to a location in the expression text.
pub trait PositionalError {
    fn range(&self) -> Span;
    fn describe(&self) -> String;
}
