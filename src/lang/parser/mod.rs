mod tokenizer;
mod symbol;
mod postfix;

pub use self::tokenizer::*;
pub use self::symbol::*;
pub use self::postfix::*;

use super::*;
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid token '{token}': {issue}")]
    InvalidToken { token: String, issue: TokenIssue },
    #[error("invalid expression: {0}")]
    InvalidExpression(ExpressionIssue),
    #[error("operand stack overflow: more than {limit} operands")]
    StackOverflow { limit: usize },
    #[error("expression nests more than {limit} operations deep")]
    TooDeep { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenIssue {
    #[error("longer than {0} characters")]
    TooLong(usize),
    #[error("not a number, name or operator")]
    Unrecognized,
    #[error("names may only contain letters")]
    NotAName,
    #[error("expected a name or a number")]
    NotAnOperand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExpressionIssue {
    #[error("no operands")]
    Empty,
    #[error("'{0}' is missing an operand")]
    MissingOperand(Operator),
    #[error("{0} operands left without an operator")]
    Unconsumed(usize),
}

impl Error {
    pub(crate) fn invalid_token(token: &str, issue: TokenIssue) -> Error {
        Error::InvalidToken {
            token: token.to_string(),
            issue: issue,
        }
    }
}

/// Parses a whole line of RPN text into a single expression tree.
pub fn parse(s: &str, limits: &Limits) -> Result<Expression, Error> {
    let mut postfix = Postfix::new(limits);
    for token in tokenize(s, limits.max_token_len) {
        postfix.push(token?.text)?;
    }
    let expr = postfix.into_expression()?;
    trace!("parsed '{}' as {:?}", s.trim(), expr);
    Ok(expr)
}

/// Parses an already tokenized RPN expression.
pub fn parse_tokens<'a, 'b: 'a, I>(tokens: I, limits: &Limits) -> Result<Expression, Error>
where
    I: IntoIterator<Item = &'a Token<'b>>,
{
    let mut postfix = Postfix::new(limits);
    for token in tokens {
        postfix.push(token.text)?;
    }
    postfix.into_expression()
}
