//! Triads, the three-address code produced by the parser.

use std::fmt::{self, Display, Formatter};

use crate::listing::Listing;

pub type TriadListing = Listing<Triad>;

/// A single triad: an operator applied to two operands, optionally producing a temporary.
#[derive(Debug, Clone, PartialEq)]
pub struct Triad {
    /// One-based creation order within the parse that produced this triad.
    pub line: usize,
    pub op: Operator,
    pub left: Operand,
    pub right: Operand,
    /// The temporary holding the value of this triad. Assignments have none.
    pub result: Option<Temp>,
}
impl Triad {
    pub fn new(
        line: usize,
        op: Operator,
        left: Operand,
        right: Operand,
        result: Option<Temp>,
    ) -> Self {
        Self {
            line,
            op,
            left,
            right,
            result,
        }
    }

    /// The operands of this triad, left first.
    pub fn operands(&self) -> [&Operand; 2] {
        [&self.left, &self.right]
    }

    /// All temporaries this triad reads from, including ones wrapped in a unary minus.
    pub fn reads(&self) -> Vec<Temp> {
        let mut temps = vec![];
        for operand in self.operands() {
            temps.extend(operand.as_temp());
        }
        temps
    }

    /// Whether both operands are literal constants, meaning the value of this triad is
    /// statically known.
    pub fn has_constant_operands(&self) -> bool {
        self.left.is_constant() && self.right.is_constant()
    }

    /// Whether this triad computes over the same operand pattern as `other`.
    /// The operator is deliberately not part of the comparison.
    pub fn same_operands(&self, other: &Triad) -> bool {
        self.left == other.left && self.right == other.right
    }

    /// Long form used in diagnostics, e.g. `3: ^3 = + (^2 c)`.
    pub fn describe(&self) -> String {
        match self.result {
            Some(result) => format!("{}: {} = {}", self.line, result, self),
            None => format!("{}: {}", self.line, self),
        }
    }
}
impl Display for Triad {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ({} {})", self.op, self.left, self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}
impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Operator::Assign => ":=",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        })
    }
}

/// A compiler-generated temporary, referenced by its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Temp(pub usize);
impl Display for Temp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "^{}", self.0)
    }
}

/// A literal constant as written in the expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Number(f64),
    Char(char),
}
impl Display for Constant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Constant::Number(n) => write!(f, "{}", n),
            Constant::Char(c) => write!(f, "'{}'", c),
        }
    }
}

/// A triad operand.
///
/// Equality is structural: variables compare by name, constants by value, temporaries by
/// index and a unary minus by the operand it wraps. Dangling references compare by the
/// temporary they used to read, so two unrelated ones never look alike.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Variable(String),
    Constant(Constant),
    Temp(Temp),
    /// A negated operand. Negation never emits a triad of its own.
    UnaryMinus(Box<Operand>),
    /// A read of a temporary whose producer was removed by a rewrite. Holds the temporary as
    /// it was numbered before the rewrite.
    Dangling(Temp),
}
impl Operand {
    pub fn variable<S: Into<String>>(name: S) -> Self {
        Self::Variable(name.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Constant(Constant::Number(value))
    }

    pub fn negate(self) -> Self {
        Self::UnaryMinus(Box::new(self))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// The temporary this operand refers to, looking through any unary minus.
    pub fn as_temp(&self) -> Option<Temp> {
        match self {
            Self::Temp(temp) => Some(*temp),
            Self::UnaryMinus(inner) => inner.as_temp(),
            Self::Variable(_) | Self::Constant(_) | Self::Dangling(_) => None,
        }
    }

    /// Replaces every temporary inside this operand with the operand returned by `f`.
    /// Dangling references are not temporaries and stay as they are.
    pub fn map_temps<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(Temp) -> Operand,
    {
        match self {
            Self::Temp(temp) => f(*temp),
            Self::UnaryMinus(inner) => inner.map_temps(f).negate(),
            other => other.clone(),
        }
    }
}
impl Display for Operand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name),
            Self::Constant(constant) => constant.fmt(f),
            Self::Temp(temp) => temp.fmt(f),
            Self::UnaryMinus(inner) => write!(f, "-{}", inner),
            Self::Dangling(temp) => write!(f, "?{}", temp),
        }
    }
}
impl From<Constant> for Operand {
    fn from(constant: Constant) -> Self {
        Self::Constant(constant)
    }
}
impl From<Temp> for Operand {
    fn from(temp: Temp) -> Self {
        Self::Temp(temp)
    }
}
