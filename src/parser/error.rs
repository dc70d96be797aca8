//! Error handling for parsing.
use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use super::scanner::Scanner;
use crate::{error::PositionalError, span::Span};

/// A parsing error, indicating both the parsing stage in which the error was encountered
/// and the cause for the error.
#[derive(Debug, Error, PartialEq)]
pub struct ParseError {
    stage: Stage,
    reason: Reason,
    span: Span,
    remaining: String,
}

impl ParseError {
    pub fn new(stage: Stage, reason: Reason, span: Span, remaining: impl Into<String>) -> Self {
        Self {
            stage,
            reason,
            span,
            remaining: remaining.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// The input that was left unconsumed when parsing failed.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} when parsing {}, but ", self.reason(), self.stage())?;
        match self.remaining() {
            "" => f.write_str("reached the end of input"),
            remaining => write!(f, "found '{}'", remaining),
        }
    }
}

impl PositionalError for ParseError {
    fn range(&self) -> Span {
        self.span
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("expected '{0}'")]
    ExpectedToken(&'static str),
    #[error("expected a variable or a constant")]
    ExpectedOperand,
    #[error("expected a letter or digit")]
    ExpectedLetterOrDigit,
    #[error("invalid numeric constant '{0}'")]
    InvalidNumber(String),
    #[error("unexpected input after ';'")]
    TrailingInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A complete assignment statement.
    Statement,
    /// The variable or constant being assigned to.
    AssignTarget,
    /// The `:=` between target and value.
    AssignOperator,
    /// An operand of a binary operation.
    Factor,
    /// The end of a parenthesised expression.
    ParenExprEnd,
    /// A quoted char constant.
    CharConstant,
    /// The `;` terminating the statement.
    StatementEnd,
}
impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::Statement => "a statement",
            Stage::AssignTarget => "an assignment target",
            Stage::AssignOperator => "the assignment operator",
            Stage::Factor => "a factor",
            Stage::ParenExprEnd => "the end of a parenthesised expression",
            Stage::CharConstant => "a char constant",
            Stage::StatementEnd => "the end of a statement",
        })
    }
}

pub trait AddStage {
    type Annotated;

    /// Attaches the stage, along with the current position and the remaining input of
    /// `scanner`, to a failure.
    fn add_stage(self, stage: Stage, scanner: &Scanner) -> Self::Annotated;
}

impl<O> AddStage for Result<O, Reason> {
    type Annotated = Result<O, ParseError>;

    fn add_stage(self, stage: Stage, scanner: &Scanner) -> Self::Annotated {
        self.map_err(|reason| failure_at(stage, reason, scanner))
    }
}

/// Constructs the error for a failure at the current position of `scanner`.
pub fn failure_at(stage: Stage, reason: Reason, scanner: &Scanner) -> ParseError {
    let mut scanner = scanner.clone();
    ParseError::new(stage, reason, scanner.next_span(), scanner.remaining())
}
