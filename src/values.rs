use failure::Error;
use itertools::join;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::ast::{Node, Num};
use crate::env::{Env, EnvRef};
use crate::errors::RunError;
use crate::eval;

/// the signature every builtin procedure shares: evaluated arguments in,
/// value out. builtins never see unevaluated syntax or the environment.
pub type BuiltinFn = fn(Vec<Value>) -> Result<Value, Error>;

/// representation of rlisp's runtime data types
#[derive(Debug, Clone)]
pub enum Value {
    Symbol(String),
    Str(String),
    Number(Num),
    Bool(bool),
    List(Vec<Value>),
    Lambda(Box<Closure>),
    Native(NativeProc),
}

use self::Value::*;

impl Value {
    /// make a bool out of a value. only #f and the empty list are falsy;
    /// everything else, including 0 and "", is truthy.
    pub fn to_bool(&self) -> bool {
        match self {
            Bool(b) => *b,
            List(items) => !items.is_empty(),
            _ => true,
        }
    }

    /// get the human-friendly type of a `Value`
    pub fn get_type(&self) -> String {
        match self {
            Symbol(_) => "Symbol",
            Str(_) => "Str",
            Number(_) => "Number",
            Bool(_) => "Bool",
            List(_) => "List",
            Lambda(_) => "Lambda",
            Native(_) => "Builtin",
        }
        .to_owned()
    }
}

/// quoting turns syntax into data verbatim, whatever its shape
impl<'a> From<&'a Node> for Value {
    fn from(node: &Node) -> Value {
        match node {
            Node::Number(n, _) => Number(*n),
            Node::Str(s, _) => Str(s.clone()),
            Node::Bool(b, _) => Bool(*b),
            Node::Symbol(s, _) => Symbol(s.clone()),
            Node::List(items) => List(items.iter().map(Value::from).collect()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol(s) => write!(f, "{}", s),
            Str(s) => write!(f, "{}", s),
            Number(n) => write!(f, "{}", n),
            Bool(true) => write!(f, "#t"),
            Bool(false) => write!(f, "#f"),
            List(items) => write!(f, "({})", join(items.iter(), " ")),
            Lambda(closure) => write!(
                f,
                "(lambda ({}) {})",
                join(closure.params.iter(), " "),
                closure.body
            ),
            Native(native) => write!(f, "#<builtin {}>", native.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Symbol(a), Symbol(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) => a == b,
            // procedures and values of different types are not equivalent
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        if let (Number(a), Number(b)) = (self, other) {
            a.partial_cmp(b)
        } else {
            None
        }
    }
}

/// a host-native procedure exposed in the root environment
#[derive(Clone, Copy)]
pub struct NativeProc {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for NativeProc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#<builtin {}>", self.name)
    }
}

/// a user-defined procedure: named, typeless parameters, a single
/// un-evaluated body expression, and the environment captured at the moment
/// of its creation. that captured environment is what makes scoping lexical.
#[derive(Clone)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Node,
    pub env: EnvRef,
}

impl Closure {
    /// run a closure with some already-evaluated arguments
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, Error> {
        if args.len() != self.params.len() {
            Err(RunError::WrongNumArgs {
                name: name.to_owned(),
                expected: self.params.len(),
                got: args.len(),
            })?
        }

        // parameters bind in a fresh scope whose parent is the *captured*
        // environment, not the caller's
        let mut local_env = Env::new(Some(self.env.clone()));
        for (param, arg) in self.params.iter().zip(args) {
            local_env.define(param, arg);
        }

        let local_env_ref: EnvRef = Rc::new(RefCell::new(local_env));
        eval::eval(&self.body, local_env_ref)
    }
}

// the captured environment may transitively contain this closure, so the
// derived impl would recurse forever
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish()
    }
}
