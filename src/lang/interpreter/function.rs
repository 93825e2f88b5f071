use super::*;
use std::collections::HashMap;

/// A user-defined function: parameter names plus the RPN body, kept as text
/// and parsed again on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub params: Vec<Name>,
    pub body: String,
}

impl Function {
    pub fn new(params: Vec<Name>, body: &str) -> Function {
        Function {
            params: params,
            body: body.to_string(),
        }
    }

    pub fn check_arity(&self, name: &Name, provided_count: usize) -> Result<(), Error> {
        if self.params.len() != provided_count {
            return Err(Error::ArityMismatch {
                name: name.clone(),
                params_count: self.params.len(),
                provided_count: provided_count,
            });
        }
        Ok(())
    }

    /// Binds `args` to the parameters in a fresh call frame and evaluates the
    /// body there. The caller's bindings are back in place when this returns,
    /// whether or not evaluation succeeded.
    pub fn call(
        &self,
        name: &Name,
        args: &[i32],
        environment: &mut Environment,
        limits: &Limits,
    ) -> Result<i32, Error> {
        self.check_arity(name, args.len())?;
        let body = parser::parse(&self.body, limits).map_err(|error| Error::InvalidBody {
            name: name.clone(),
            error: error,
        })?;

        let mut frame = environment.enter_call();
        for (param, &arg) in self.params.iter().zip(args) {
            frame.set(param.clone(), arg);
        }
        evaluate(&body, &frame)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<Name, Function>,
}

impl FunctionTable {
    pub fn new() -> FunctionTable {
        FunctionTable {
            functions: HashMap::new(),
        }
    }

    /// Stores `function` under `name`, returning any definition it replaced.
    pub fn define(&mut self, name: Name, function: Function) -> Option<Function> {
        self.functions.insert(name, function)
    }

    pub fn lookup(&self, name: &Name) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_name(s: &str) -> Name {
        Name(s.to_string())
    }

    fn square() -> Function {
        Function::new(vec![as_name("a")], "a a *")
    }

    #[test]
    fn call_binds_params_in_order() {
        let f = Function::new(vec![as_name("a"), as_name("b")], "a b -");
        let mut env = Environment::new();
        assert_eq!(f.call(&as_name("f"), &[10, 3], &mut env, &Limits::default()), Ok(7));
    }

    #[test]
    fn call_leaves_caller_untouched() {
        let mut env = Environment::new();
        env.set(as_name("a"), 2);
        env.set(as_name("z"), 9);
        let before = env.clone();
        assert_eq!(
            square().call(&as_name("square"), &[5], &mut env, &Limits::default()),
            Ok(25)
        );
        assert_eq!(env, before);
    }

    #[test]
    fn body_cannot_see_caller_variables() {
        let f = Function::new(vec![as_name("a")], "a n *");
        let mut env = Environment::new();
        env.set(as_name("n"), 3);
        let before = env.clone();
        assert_eq!(
            f.call(&as_name("f"), &[2], &mut env, &Limits::default()),
            Err(Error::UndefinedVariable(as_name("n")))
        );
        assert_eq!(env, before);
    }

    #[test]
    fn invalid_body_errors() {
        let f = Function::new(vec![as_name("a")], "a +");
        let mut env = Environment::new();
        assert_eq!(
            f.call(&as_name("f"), &[1], &mut env, &Limits::default()),
            Err(Error::InvalidBody {
                name: as_name("f"),
                error: parser::Error::InvalidExpression(parser::ExpressionIssue::MissingOperand(
                    Operator::Add
                )),
            })
        );
    }

    #[test]
    fn wrong_argument_count_errors() {
        let mut env = Environment::new();
        assert_eq!(
            square().call(&as_name("square"), &[1, 2], &mut env, &Limits::default()),
            Err(Error::ArityMismatch {
                name: as_name("square"),
                params_count: 1,
                provided_count: 2,
            })
        );
    }

    #[test]
    fn redefinition_replaces() {
        let mut table = FunctionTable::new();
        assert_eq!(table.define(as_name("f"), square()), None);
        let add = Function::new(vec![as_name("x"), as_name("y")], "x y +");
        assert_eq!(table.define(as_name("f"), add.clone()), Some(square()));
        assert_eq!(table.lookup(&as_name("f")), Some(&add));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&as_name("g")), None);
    }
}
