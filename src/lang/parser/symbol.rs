use super::*;

/// What a single RPN token stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Operator(Operator),
    Variable(Name),
    Number(i32),
}

pub fn symbol(token: &str) -> Result<Symbol, Error> {
    if let Some(operator) = Operator::from_symbol(token) {
        return Ok(Symbol::Operator(operator));
    }
    operand(token)
}

/// Like `symbol`, but rejects operators.
pub fn operand(token: &str) -> Result<Symbol, Error> {
    match token.chars().next() {
        Some(c) if c.is_alphabetic() => {
            if is_name(token) {
                Ok(Symbol::Variable(Name::new(token)))
            } else {
                Err(Error::invalid_token(token, TokenIssue::NotAName))
            }
        }
        _ => match number(token) {
            Some(n) => Ok(Symbol::Number(n)),
            None if Operator::from_symbol(token).is_some() => {
                Err(Error::invalid_token(token, TokenIssue::NotAnOperand))
            }
            None => Err(Error::invalid_token(token, TokenIssue::Unrecognized)),
        },
    }
}

pub fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// Decimal literal with an optional leading `-`. Digits accumulate with
/// wrapping 32-bit arithmetic, so oversized literals wrap instead of failing.
pub fn number(s: &str) -> Option<i32> {
    let (negative, digits) = match s.as_bytes().split_first() {
        Some((&b'-', rest)) => (true, rest),
        _ => (false, s.as_bytes()),
    };
    if digits.is_empty() {
        return None;
    }
    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.wrapping_mul(10).wrapping_add(i32::from(b - b'0'));
    }
    Some(if negative { value.wrapping_neg() } else { value })
}
