use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::builtin::Builtin;
use crate::error::RuntimeError;
use crate::value::{Callable, Value};

/// One scope in the chain searched during name resolution.
///
/// A new scope is created for every closure invocation, enclosed by the
/// closure's defining environment rather than the caller's.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Create a new environment that is enclosed by a given outer environment
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Create a root environment holding `true`, `false` and every builtin.
    pub fn global() -> Self {
        let mut env = Environment::new();

        env.define("true", Value::Boolean(true));
        env.define("false", Value::Boolean(false));
        for builtin in Builtin::ALL.iter() {
            env.define(builtin.name(), Value::Callable(Callable::Builtin(*builtin)));
        }

        env
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            // If not found in this environment, look for it in the outer environment
            None => match self.outer {
                Some(ref outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Like `get`, but a missing name is an `UndefinedBinding` error.
    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.get(name)
            .ok_or_else(|| RuntimeError::UndefinedBinding(name.to_owned()))
    }

    /// Whether this environment itself (not an ancestor) binds `name`.
    pub fn owns(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Create or overwrite a binding in this environment only.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Overwrite the binding in the nearest environment that owns `name`.
    /// Never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            Ok(())
        } else {
            match self.outer {
                Some(ref outer) => outer.borrow_mut().assign(name, value),
                None => Err(RuntimeError::UndefinedAssignment(name.to_owned())),
            }
        }
    }
}
