use super::*;

/// Operand stack that folds postfix tokens into an expression tree.
///
/// Each entry remembers how deeply nested its tree is, so a long chain like
/// `1 1 + 1 + ...` is cut off at `max_nesting` even though it never holds
/// more than two operands at once.
#[derive(Debug, Clone)]
pub struct Postfix {
    stack: Vec<(Expression, usize)>,
    max_operands: usize,
    max_nesting: usize,
}

impl Postfix {
    pub fn new(limits: &Limits) -> Postfix {
        Postfix {
            stack: vec![],
            max_operands: limits.max_stack_depth,
            max_nesting: limits.max_nesting,
        }
    }

    pub fn push(&mut self, token: &str) -> Result<(), Error> {
        let entry = match symbol(token)? {
            Symbol::Operator(operator) => {
                let (right, right_nesting) = self.pop(operator)?;
                let (left, left_nesting) = self.pop(operator)?;
                let nesting = 1 + left_nesting.max(right_nesting);
                if nesting > self.max_nesting {
                    return Err(Error::TooDeep {
                        limit: self.max_nesting,
                    });
                }
                (
                    Expression::Operation(operator, Box::new(left), Box::new(right)),
                    nesting,
                )
            }
            Symbol::Variable(name) => self.operand(Expression::Variable(name))?,
            Symbol::Number(n) => self.operand(Expression::Number(n))?,
        };
        self.stack.push(entry);
        Ok(())
    }

    fn operand(&self, expr: Expression) -> Result<(Expression, usize), Error> {
        if self.stack.len() >= self.max_operands {
            return Err(Error::StackOverflow {
                limit: self.max_operands,
            });
        }
        Ok((expr, 0))
    }

    fn pop(&mut self, operator: Operator) -> Result<(Expression, usize), Error> {
        self.stack
            .pop()
            .ok_or(Error::InvalidExpression(ExpressionIssue::MissingOperand(operator)))
    }

    pub fn into_expression(mut self) -> Result<Expression, Error> {
        match self.stack.len() {
            1 => Ok(self.stack.remove(0).0),
            0 => Err(Error::InvalidExpression(ExpressionIssue::Empty)),
            n => Err(Error::InvalidExpression(ExpressionIssue::Unconsumed(n))),
        }
    }
}
