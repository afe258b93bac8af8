#[macro_use]
extern crate failure_derive;

mod arithmetic;
mod builtins;
mod file;
mod log;

pub mod ast;
pub mod env;
pub mod errors;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod values;

use failure::Error;
use std::cell::RefCell;
use std::rc::Rc;

use crate::env::{Env, EnvRef};
use crate::values::Value;

/// an interpreter instance: one persistent root environment that lives for
/// the lifetime of the instance, shared by every `interpret` call
#[derive(Clone)]
pub struct Interpreter {
    pub env: EnvRef,
}

impl Interpreter {
    /// create a new Interpreter with a freshly-populated root environment
    pub fn new() -> Interpreter {
        Interpreter {
            env: Rc::new(RefCell::new(Env::new(None))),
        }
    }

    /// evaluate a string of lisp code: every top-level form in order, against
    /// the persistent environment. returns the last form's value, or `None`
    /// for an empty program. an error aborts the current call immediately,
    /// but bindings made before the error stay visible to later calls.
    pub fn interpret(&self, source: &str) -> Result<Option<Value>, Error> {
        let program = parser::parse(source)?;

        let mut result = None;
        for node in &program {
            result = Some(eval::eval(node, self.env.clone())?);
        }
        Ok(result)
    }
}

impl Default for Interpreter {
    fn default() -> Interpreter {
        Interpreter::new()
    }
}
