//! Converts an assignment statement into a listing of triads.
mod char_ext;
mod error;
mod parser;
mod scanner;

pub use parser::parse;

/// Removes all whitespace from `source`. The grammar itself has no notion of whitespace.
pub fn strip_whitespace(source: &str) -> String {
    source.chars().filter(|ch| !ch.is_whitespace()).collect()
}
