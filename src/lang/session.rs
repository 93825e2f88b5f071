use super::*;
use super::interpreter::{evaluate, Environment, Function, FunctionTable};
use super::parser::{parse_tokens, tokenize, Symbol, Token, TokenIssue};
use log::{debug, trace};
use std::collections::HashSet;

const DEF: &str = "def";
const END: &str = "end";
const ASSIGN: &str = "=";

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Assignment(Name, Vec<Token<'a>>),
    Definition(Name, Function),
    Call(Name, Vec<Token<'a>>),
    Bare(Vec<Token<'a>>),
}

/// The result of one successfully executed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Assigned { name: Name, value: i32 },
    Defined { name: Name, params: Vec<Name> },
    Called { name: Name, value: i32 },
    Evaluated(i32),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Assigned { ref name, value } => write!(f, "[set] {} = {}", name, value),
            Outcome::Defined {
                ref name,
                ref params,
            } => {
                write!(f, "[def] {}(", name)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
            Outcome::Called { ref name, value } => write!(f, "[call] {} = {}", name, value),
            Outcome::Evaluated(value) => write!(f, "[eval] {}", value),
        }
    }
}

/// One interpreter session: the global variables, the defined functions and
/// the limits every line is checked against.
#[derive(Debug, Clone, Default)]
pub struct Session {
    environment: Environment,
    functions: FunctionTable,
    limits: Limits,
}

impl Session {
    pub fn new() -> Session {
        Session::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Session {
        Session {
            environment: Environment::new(),
            functions: FunctionTable::new(),
            limits: limits,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Classifies and runs one line. A failed line leaves the session exactly
    /// as it was.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, Error> {
        let command = self.classify(line)?;
        debug!("executing {:?}", command);
        let outcome = self.run(command)?;
        debug!("{}", outcome);
        Ok(outcome)
    }

    /// Decides what kind of command `line` is, trying assignment, definition,
    /// call and bare expression in that order.
    pub fn classify<'a>(&self, line: &'a str) -> Result<Command<'a>, Error> {
        let tokens = tokenize(line, self.limits.max_token_len).collect::<Result<Vec<_>, _>>()?;
        trace!("tokens: {:?}", tokens);

        if tokens.len() >= 2 && tokens[1].text == ASSIGN {
            let target = tokens[0].text;
            if !parser::is_name(target) {
                return Err(parser::Error::invalid_token(target, TokenIssue::NotAName).into());
            }
            return Ok(Command::Assignment(Name::new(target), tokens[2..].to_vec()));
        }

        if tokens.first().map(|t| t.text) == Some(DEF) {
            let (name, function) = self.definition(line, &tokens)?;
            return Ok(Command::Definition(name, function));
        }

        if let Some(first) = tokens.first() {
            let name = Name::new(first.text);
            if self.functions.lookup(&name).is_some() {
                return Ok(Command::Call(name, tokens[1..].to_vec()));
            }
        }

        Ok(Command::Bare(tokens))
    }

    fn definition(&self, line: &str, tokens: &[Token]) -> Result<(Name, Function), Error> {
        let malformed = Error::MalformedDefinition;

        let name = match tokens.get(1) {
            Some(token) if parser::is_name(token.text) => Name::new(token.text),
            Some(token) => return Err(malformed(DefinitionError::InvalidName(token.text.to_string()))),
            None => return Err(malformed(DefinitionError::MissingName)),
        };

        let mut params = vec![];
        let mut seen = HashSet::new();
        let mut end = None;
        for token in &tokens[2..] {
            if token.text == END {
                end = Some(token);
                break;
            }
            if !parser::is_name(token.text) {
                return Err(malformed(DefinitionError::InvalidParameter(token.text.to_string())));
            }
            let param = Name::new(token.text);
            if !seen.insert(param.clone()) {
                return Err(malformed(DefinitionError::DuplicateParameter(param)));
            }
            params.push(param);
        }

        let end = end.ok_or_else(|| malformed(DefinitionError::MissingEnd))?;
        if params.is_empty() {
            return Err(malformed(DefinitionError::NoParameters));
        }
        if params.len() > self.limits.max_params {
            return Err(malformed(DefinitionError::TooManyParameters {
                limit: self.limits.max_params,
                provided: params.len(),
            }));
        }

        let body = line[end.end()..].trim();
        if body.is_empty() {
            return Err(malformed(DefinitionError::EmptyBody));
        }
        Ok((name, Function::new(params, body)))
    }

    /// Runs an already classified command against this session's state.
    pub fn run(&mut self, command: Command) -> Result<Outcome, Error> {
        match command {
            Command::Assignment(name, tokens) => {
                let expr = parse_tokens(&tokens, &self.limits)?;
                let value = evaluate(&expr, &self.environment)?;
                self.environment.set(name.clone(), value);
                Ok(Outcome::Assigned {
                    name: name,
                    value: value,
                })
            }
            Command::Definition(name, function) => {
                let params = function.params.clone();
                if self.functions.define(name.clone(), function).is_some() {
                    debug!("function '{}' redefined", name);
                }
                Ok(Outcome::Defined {
                    name: name,
                    params: params,
                })
            }
            Command::Call(name, args) => {
                let value = self.call(&name, &args)?;
                Ok(Outcome::Called {
                    name: name,
                    value: value,
                })
            }
            Command::Bare(tokens) => {
                let expr = parse_tokens(&tokens, &self.limits)?;
                Ok(Outcome::Evaluated(evaluate(&expr, &self.environment)?))
            }
        }
    }

    fn call(&mut self, name: &Name, args: &[Token]) -> Result<i32, Error> {
        let function = match self.functions.lookup(name) {
            Some(function) => function,
            None => return Err(interpreter::Error::UndefinedFunction(name.clone()).into()),
        };
        function.check_arity(name, args.len())?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.argument(arg.text)?);
        }
        trace!("calling {}{:?}", name, values);
        Ok(function.call(name, &values, &mut self.environment, &self.limits)?)
    }

    /// Arguments are read in the caller's environment, before the call frame
    /// is entered.
    fn argument(&self, token: &str) -> Result<i32, Error> {
        match parser::operand(token)? {
            Symbol::Variable(name) => Ok(self.environment.get(&name)?),
            Symbol::Number(n) => Ok(n),
            Symbol::Operator(_) => {
                Err(parser::Error::invalid_token(token, TokenIssue::NotAnOperand).into())
            }
        }
    }
}
