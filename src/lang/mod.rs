pub mod parser;
pub mod interpreter;
pub mod session;
mod limits;

pub use self::limits::Limits;
pub use self::session::{Command, Outcome, Session};

use std::fmt;
use thiserror::Error;
#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    ParseError(#[from] parser::Error),
    #[error(transparent)]
    InterpreterError(#[from] interpreter::Error),
    #[error("malformed definition: {0}")]
    MalformedDefinition(DefinitionError),
}

/// Why a `def` line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("missing function name")]
    MissingName,
    #[error("'{0}' is not a valid function name")]
    InvalidName(String),
    #[error("'{0}' is not a valid parameter name")]
    InvalidParameter(String),
    #[error("parameter '{0}' is declared more than once")]
    DuplicateParameter(Name),
    #[error("at least one parameter is required")]
    NoParameters,
    #[error("{provided} parameters declared, at most {limit} are allowed")]
    TooManyParameters { limit: usize, provided: usize },
    #[error("missing 'end' after the parameters")]
    MissingEnd,
    #[error("missing function body after 'end'")]
    EmptyBody,
}

/// Runs every non-blank line of `source` through a fresh session.
pub fn interpret(source: &str, limits: Limits) -> Vec<Result<Outcome, Error>> {
    let mut session = Session::with_limits(limits);
    source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| session.execute(line))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl Name {
    pub fn new(s: &str) -> Name {
        Name(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
impl Arbitrary for Name {
    fn arbitrary<G: Gen>(g: &mut G) -> Name {
        arbitrary_name(g, 0)
    }
}

#[cfg(test)]
fn arbitrary_name<G: Gen>(g: &mut G, level: usize) -> Name {
    let size = g.size().saturating_sub(level).max(1).min(Limits::default().max_token_len);
    let len = 0..g.gen_range(1, size + 1);
    Name(len.map(|_| {
        *g.choose(&b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"[..]).unwrap() as char
    }).collect())
}

/// A parsed RPN expression. Trees are built bottom-up by the parser and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Number(i32),
    Variable(Name),
    Operation(Operator, Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Number of binary operation nodes in the tree.
    pub fn operations(&self) -> usize {
        match *self {
            Expression::Operation(_, ref left, ref right) => {
                1 + left.operations() + right.operations()
            }
            _ => 0,
        }
    }

    /// Every variable the expression reads, left to right, duplicates included.
    #[cfg(test)]
    pub fn variables(&self) -> Vec<&Name> {
        match *self {
            Expression::Number(_) => vec![],
            Expression::Variable(ref name) => vec![name],
            Expression::Operation(_, ref left, ref right) => {
                let mut names = left.variables();
                names.extend(right.variables());
                names
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Variable(ref name) => write!(f, "{}", name),
            Expression::Operation(operator, ref left, ref right) => {
                write!(f, "{} {} {}", left, right, operator)
            }
        }
    }
}

#[cfg(test)]
impl Arbitrary for Expression {
    fn arbitrary<G: Gen>(g: &mut G) -> Expression {
        arbitrary_expression(g, 0)
    }
}

#[cfg(test)]
fn arbitrary_expression<G: Gen>(g: &mut G, level: usize) -> Expression {
    let size = g.size().saturating_sub(level);
    // Terminate expressions of sufficient depth.
    let choice = if size <= 1 { g.gen_range(0, 2) } else { g.gen_range(0, 3) };
    match choice {
        0 => Expression::Number(i32::arbitrary(g)),
        1 => Expression::Variable(arbitrary_name(g, level + 1)),
        2 => Expression::Operation(
            Operator::arbitrary(g),
            Box::new(arbitrary_expression(g, level + 1)),
            Box::new(arbitrary_expression(g, level + 1)),
        ),
        _ => unreachable!(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_symbol(s: &str) -> Option<Operator> {
        match s {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Operator::Add => "+",
                Operator::Subtract => "-",
                Operator::Multiply => "*",
                Operator::Divide => "/",
            }
        )
    }
}

#[cfg(test)]
impl Arbitrary for Operator {
    fn arbitrary<G: Gen>(g: &mut G) -> Operator {
        match g.gen_range(0, 4) {
            0 => Operator::Add,
            1 => Operator::Subtract,
            2 => Operator::Multiply,
            3 => Operator::Divide,
            _ => unreachable!(),
        }
    }
}
