use log::info;

use super::{char_ext::CharExt, error::*, scanner::Scanner};
use crate::{
    il::{Constant, Operand, Operator, TriadGenerator, TriadListing},
    span::Span,
};

type ParseResult<O> = Result<O, ParseError>;

/// Parses a single assignment statement into a listing of triads.
///
/// The source must not contain whitespace; see [`strip_whitespace`](super::strip_whitespace).
/// ```text
/// Statement    := AssignTarget ":=" Expr ";"
/// Expr         := Term (("+"|"-") Term)*
/// Term         := Factor (("*"|"/") Factor)*
/// Factor       := "(" Expr ")" | "-" Factor | AssignTarget
/// AssignTarget := Variable | NumericConstant | CharConstant
/// ```
pub fn parse(source: &str) -> ParseResult<TriadListing> {
    let mut parser = Parser::new(source);
    parser.statement()?;

    let listing = parser.generator.finish();
    info!("Parsing succeeded, emitted {} triads", listing.len());
    Ok(listing)
}

/// Recursive-descent parser, emitting triads as it reduces each binary operation.
struct Parser<'a> {
    scanner: Scanner<'a>,
    generator: TriadGenerator,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            generator: TriadGenerator::new(),
        }
    }

    fn statement(&mut self) -> ParseResult<()> {
        let target = self.operand(Stage::AssignTarget)?;
        self.scanner
            .expect(":=")
            .add_stage(Stage::AssignOperator, &self.scanner)?;

        let value = self.expression()?;
        self.scanner
            .expect(";")
            .add_stage(Stage::StatementEnd, &self.scanner)?;

        if !self.scanner.is_finished() {
            return Err(failure_at(Stage::Statement, Reason::TrailingInput, &self.scanner));
        }

        self.generator.emit_assign(target, value);
        Ok(())
    }

    fn expression(&mut self) -> ParseResult<Operand> {
        let mut lhs = self.term()?;
        while let Some(op) = self.binary_operator(&[('+', Operator::Add), ('-', Operator::Sub)]) {
            let rhs = self.term()?;
            lhs = self.generator.emit_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> ParseResult<Operand> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.binary_operator(&[('*', Operator::Mul), ('/', Operator::Div)]) {
            let rhs = self.factor()?;
            lhs = self.generator.emit_binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> ParseResult<Operand> {
        if self.scanner.recognise('(') {
            let inner = self.expression()?;
            self.scanner
                .expect(")")
                .add_stage(Stage::ParenExprEnd, &self.scanner)?;
            Ok(inner)
        } else if self.scanner.recognise('-') {
            Ok(self.factor()?.negate())
        } else {
            self.operand(Stage::Factor)
        }
    }

    /// Consumes the next character if it is one of the given operators.
    fn binary_operator(&mut self, operators: &[(char, Operator)]) -> Option<Operator> {
        operators
            .iter()
            .find(|(symbol, _)| self.scanner.recognise(*symbol))
            .map(|(_, op)| *op)
    }

    /// A variable, numeric constant or char constant.
    fn operand(&mut self, stage: Stage) -> ParseResult<Operand> {
        match self.scanner.peek() {
            Some(ch) if ch.is_variable_start() => Ok(Operand::variable(
                self.scanner.consume_while(CharExt::is_variable_continuation),
            )),
            Some(ch) if ch.is_numeric_constant() => self.number(stage),
            Some('\'') => self.char_constant(),
            _ => Err(failure_at(stage, Reason::ExpectedOperand, &self.scanner)),
        }
    }

    fn number(&mut self, stage: Stage) -> ParseResult<Operand> {
        let start = self.scanner.byte_position();
        let remaining = self.scanner.remaining();
        let digits = self.scanner.consume_while(CharExt::is_numeric_constant);

        digits.parse::<f64>().map(Operand::number).map_err(|_| {
            let span = Span::new(start, self.scanner.byte_position());
            ParseError::new(stage, Reason::InvalidNumber(digits.clone()), span, remaining)
        })
    }

    fn char_constant(&mut self) -> ParseResult<Operand> {
        self.scanner
            .expect("'")
            .add_stage(Stage::CharConstant, &self.scanner)?;

        let body = match self.scanner.peek() {
            Some(ch) if ch.is_char_constant_body() => ch,
            _ => {
                return Err(failure_at(
                    Stage::CharConstant,
                    Reason::ExpectedLetterOrDigit,
                    &self.scanner,
                ))
            }
        };
        self.scanner.try_next();

        self.scanner
            .expect("'")
            .add_stage(Stage::CharConstant, &self.scanner)?;
        Ok(Constant::Char(body).into())
    }
}
