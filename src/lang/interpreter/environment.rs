use super::*;
use std::mem;
use std::ops::{Deref, DerefMut};

/// Variable bindings, kept in insertion order. Setting an existing name
/// overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    bindings: Vec<(Name, i32)>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment { bindings: vec![] }
    }

    pub fn set(&mut self, name: Name, value: i32) {
        match self.bindings.iter_mut().find(|binding| binding.0 == name) {
            Some(binding) => binding.1 = value,
            None => self.bindings.push((name, value)),
        }
    }

    pub fn get(&self, name: &Name) -> Result<i32, Error> {
        self.bindings
            .iter()
            .find(|binding| binding.0 == *name)
            .map(|binding| binding.1)
            .ok_or_else(|| Error::UndefinedVariable(name.clone()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, i32)> {
        self.bindings.iter().map(|binding| (&binding.0, binding.1))
    }

    /// Moves every binding aside and leaves the environment empty until the
    /// returned frame is dropped, which puts the caller's bindings back.
    pub fn enter_call(&mut self) -> CallFrame {
        let caller = mem::replace(&mut self.bindings, vec![]);
        CallFrame {
            environment: self,
            caller: caller,
        }
    }
}

/// A function call's private scope. Derefs to the (initially empty) call-local
/// environment; dropping it discards the locals and restores the caller's.
#[derive(Debug)]
pub struct CallFrame<'a> {
    environment: &'a mut Environment,
    caller: Vec<(Name, i32)>,
}

impl<'a> Deref for CallFrame<'a> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.environment
    }
}

impl<'a> DerefMut for CallFrame<'a> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.environment
    }
}

impl<'a> Drop for CallFrame<'a> {
    fn drop(&mut self) {
        self.environment.bindings = mem::replace(&mut self.caller, vec![]);
    }
}
