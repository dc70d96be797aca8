use log::trace;

use super::{line_generator::*, name_generator::*, triad::*};

/// Builds the triad listing for a single parse. Owns the temporary and line counters, so
/// separate parses never influence each other's numbering.
pub struct TriadGenerator {
    listing: TriadListing,
    name_generator: NameGenerator,
    line_generator: LineGenerator,
}
impl TriadGenerator {
    pub fn new() -> Self {
        Self {
            listing: TriadListing::new(),
            name_generator: NameGenerator::new(),
            line_generator: LineGenerator::new(),
        }
    }

    /// Emit a binary operation into a fresh temporary. Returns the temporary as an operand,
    /// so it can be used by the enclosing expression.
    pub fn emit_binary(&mut self, op: Operator, left: Operand, right: Operand) -> Operand {
        let result = self.name_generator.next_temp();
        self.emit(op, left, right, Some(result));
        result.into()
    }

    /// Emit the assignment of `value` to `target`.
    pub fn emit_assign(&mut self, target: Operand, value: Operand) {
        self.emit(Operator::Assign, target, value, None);
    }

    /// Emit an instruction, adding it to the listing.
    fn emit(&mut self, op: Operator, left: Operand, right: Operand, result: Option<Temp>) {
        let line = self.line_generator.next_line();
        let triad = Triad::new(line, op, left, right, result);
        trace!("Emit {}", triad.describe());
        self.listing.push(triad);
    }

    pub fn finish(self) -> TriadListing {
        self.listing
    }
}
