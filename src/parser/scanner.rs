use std::{iter::Peekable, str::Chars};

use super::error::Reason;
use crate::span::{Bytes, Span};

/// Abstraction over a peekable char iterator with position information.
///
/// Since it only holds a borrowed source, an iterator and a position, this type is very
/// lightweight, making it cheap to clone when an error needs a snapshot of where it
/// occurred.
#[derive(Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    byte_position: Bytes,
}

impl<'a> Scanner<'a> {
    /// Constructs a new [`Scanner`] for the given source string, starting at position `0`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            byte_position: Bytes::new(0),
        }
    }

    /// Tries to advance the scanner by one character.
    /// Returns the character wrapped in an [`Option`] if it was successful,
    /// or [`None`] if the scanner cannot advance any further.
    pub fn try_next(&mut self) -> Option<char> {
        let next = self.chars.next();
        if let Some(ch) = next {
            self.byte_position += ch.len_utf8();
        }
        next
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    pub fn byte_position(&self) -> Bytes {
        self.byte_position
    }

    /// The input that has not been consumed yet.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.byte_position.into()..]
    }

    /// The span of the next character, or an empty span at the end of the input.
    pub fn next_span(&mut self) -> Span {
        let start = self.byte_position;
        match self.peek() {
            Some(ch) => {
                let mut end = start;
                end += ch.len_utf8();
                Span::new(start, end)
            }
            None => Span::empty(start),
        }
    }

    /// Peeks at the next character, and consumes it if it matches the provided character.
    /// Returns true if the character was consumed, false otherwise.
    pub fn recognise(&mut self, character: char) -> bool {
        match self.chars.peek() {
            Some(ch) if ch == &character => {
                self.try_next();
                true
            }
            _ => false,
        }
    }

    /// Consumes `token` if the remaining input starts with it. If it does not, the scanner
    /// is not advanced, and an error is returned instead.
    pub fn expect(&mut self, token: &'static str) -> Result<(), Reason> {
        if !self.remaining().starts_with(token) {
            return Err(Reason::ExpectedToken(token));
        }
        for _ in token.chars() {
            self.try_next();
        }
        Ok(())
    }

    /// Consumes characters while `P(char)` evaluates to `true`.
    /// Returns a [`String`] containing the consumed characters.
    pub fn consume_while<P>(&mut self, mut predicate: P) -> String
    where
        P: FnMut(&char) -> bool,
    {
        let mut matches = String::new();
        while let Some(ch) = self.chars.peek() {
            if predicate(ch) {
                matches.push(*ch);
                self.try_next();
            } else {
                break;
            }
        }
        matches
    }

    pub fn is_finished(&mut self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_while_stops_at_first_mismatch() {
        let mut scanner = Scanner::new("abc1+d");

        assert_eq!("abc1", scanner.consume_while(char::is_ascii_alphanumeric));
        assert_eq!(Bytes::new(4), scanner.byte_position());
        assert_eq!("+d", scanner.remaining());
    }

    #[test]
    fn expect_leaves_scanner_in_place_on_mismatch() {
        let mut scanner = Scanner::new(":-");

        assert_eq!(Err(Reason::ExpectedToken(":=")), scanner.expect(":="));
        assert_eq!(":-", scanner.remaining());

        assert!(scanner.recognise(':'));
        assert!(!scanner.recognise(':'));
        assert_eq!(Ok(()), scanner.expect("-"));
        assert!(scanner.is_finished());
    }

    #[test]
    fn positions_count_bytes() {
        let mut scanner = Scanner::new("ä+b");

        scanner.try_next();
        assert_eq!(Bytes::new(2), scanner.byte_position());
        assert_eq!(Span::new(Bytes::new(2), Bytes::new(3)), scanner.next_span());
    }

    #[test]
    fn next_span_is_empty_at_end_of_input() {
        let mut scanner = Scanner::new("a");
        scanner.try_next();

        assert_eq!(Span::empty(Bytes::new(1)), scanner.next_span());
        assert_eq!("", scanner.remaining());
    }
}
