mod environment;
mod function;

pub use self::environment::*;
pub use self::function::*;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(Name),
    #[error("function '{0}' is not defined")]
    UndefinedFunction(Name),
    #[error("function '{name}' takes {params_count} argument(s), {provided_count} provided")]
    ArityMismatch {
        name: Name,
        params_count: usize,
        provided_count: usize,
    },
    #[error("body of function '{name}' is invalid: {error}")]
    InvalidBody { name: Name, error: parser::Error },
}

/// Reduces an expression to a value, reading variables from `environment`.
pub fn evaluate(expr: &Expression, environment: &Environment) -> Result<i32, Error> {
    match *expr {
        Expression::Number(n) => Ok(n),
        Expression::Variable(ref name) => environment.get(name),
        Expression::Operation(operator, ref left, ref right) => {
            let left = evaluate(left, environment)?;
            let right = evaluate(right, environment)?;
            Ok(operation(operator, left, right))
        }
    }
}

/// Arithmetic wraps on overflow. Division truncates toward zero and a zero
/// divisor yields 0.
pub fn operation(operator: Operator, left: i32, right: i32) -> i32 {
    match operator {
        Operator::Add => left.wrapping_add(right),
        Operator::Subtract => left.wrapping_sub(right),
        Operator::Multiply => left.wrapping_mul(right),
        Operator::Divide => if right == 0 {
            0
        } else {
            left.wrapping_div(right)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;
    use quickcheck::{QuickCheck, StdGen};

    fn eval(s: &str, environment: &Environment) -> Result<i32, Error> {
        evaluate(&parser::parse(s, &Limits::default()).unwrap(), environment)
    }

    #[test]
    fn arithmetic() {
        let env = Environment::new();
        assert_eq!(eval("3 4 +", &env), Ok(7));
        assert_eq!(eval("3 4 -", &env), Ok(-1));
        assert_eq!(eval("6 7 *", &env), Ok(42));
        assert_eq!(eval("2 3 4 * +", &env), Ok(14));
        assert_eq!(eval("2 3 + 4 *", &env), Ok(20));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let env = Environment::new();
        assert_eq!(eval("7 2 /", &env), Ok(3));
        assert_eq!(eval("-7 2 /", &env), Ok(-3));
        assert_eq!(eval("7 -2 /", &env), Ok(-3));
    }

    #[test]
    fn division_by_zero_is_zero() {
        let env = Environment::new();
        assert_eq!(eval("6 0 /", &env), Ok(0));
        assert_eq!(eval("-6 0 /", &env), Ok(0));
        assert_eq!(eval("1 6 0 / +", &env), Ok(1));
    }

    #[test]
    fn overflow_wraps() {
        let env = Environment::new();
        assert_eq!(eval("2147483647 1 +", &env), Ok(i32::min_value()));
        assert_eq!(eval("-2147483648 1 -", &env), Ok(i32::max_value()));
        assert_eq!(eval("65536 65536 *", &env), Ok(0));
        assert_eq!(eval("-2147483648 -1 /", &env), Ok(i32::min_value()));
    }

    #[test]
    fn variables_are_looked_up() {
        let mut env = Environment::new();
        env.set(Name::new("x"), 7);
        assert_eq!(eval("x 2 *", &env), Ok(14));
        assert_eq!(eval("x x x + +", &env), Ok(21));
    }

    #[test]
    fn undefined_variable_errors() {
        let mut env = Environment::new();
        env.set(Name::new("x"), 7);
        assert_eq!(
            eval("x y +", &env),
            Err(Error::UndefinedVariable(Name::new("y")))
        );
    }

    #[test]
    fn left_operand_fails_first() {
        let env = Environment::new();
        assert_eq!(
            eval("a b +", &env),
            Err(Error::UndefinedVariable(Name::new("a")))
        );
    }

    fn evaluates_when_bound_prop(input: Expression) -> bool {
        let mut env = Environment::new();
        for (n, name) in input.variables().into_iter().enumerate() {
            env.set(name.clone(), n as i32 - 3);
        }
        evaluate(&input, &env).is_ok()
    }

    #[test]
    fn evaluates_when_every_variable_is_bound() {
        for size in 1..11 {
            let mut qc = QuickCheck::new().gen(StdGen::new(thread_rng(), size));
            qc.quickcheck(evaluates_when_bound_prop as fn(Expression) -> bool);
        }
    }
}
