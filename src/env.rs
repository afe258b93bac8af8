use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts;
use std::rc::Rc;

use crate::ast::Num;
use crate::builtins::BUILTINS;
use crate::values::{NativeProc, Value};

/// The “memory” of the interpreter is represented as a HashMap with an
/// optional parent EnvRef, that is passed around in an Rc<RefCell<>>,
/// which allows for multiple “owners” with interior mutability. closures
/// keep their captured scope alive through the shared reference count.
#[derive(Debug, Clone)]
pub struct Env {
    pub vars: HashMap<String, Value>,
    pub parent: Option<EnvRef>,
}

/// an interior-mutable, reference-counted smart pointer wrapper around an `Env`
pub type EnvRef = Rc<RefCell<Env>>;

impl Env {
    /// create a new scope. the root scope (no parent) auto-populates with
    /// the builtin procedure table and constants.
    pub fn new(parent: Option<EnvRef>) -> Env {
        match parent {
            Some(parent) => Env {
                vars: HashMap::new(),
                parent: Some(parent),
            },
            None => Env {
                vars: Env::default_bindings(),
                parent: None,
            },
        }
    }

    /// the enumerated standard library: every builtin binding, declared once
    fn default_bindings() -> HashMap<String, Value> {
        let mut vars = HashMap::new();
        for (name, func) in BUILTINS {
            vars.insert(
                (*name).to_owned(),
                Value::Native(NativeProc {
                    name: *name,
                    func: *func,
                }),
            );
        }
        vars.insert("pi".to_owned(), Value::Number(Num::Float(consts::PI)));
        vars.insert("e".to_owned(), Value::Number(Num::Float(consts::E)));
        vars
    }

    /// resolve a name to a stored value, searching the parent chain on a
    /// local miss. `None` means “not bound anywhere”, which stays
    /// distinguishable from a stored falsy value.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.vars.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.parent {
                Some(parent) => parent.borrow().get(name),
                None => None,
            },
        }
    }

    /// add (or silently overwrite) a binding in this scope only
    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    /// overwrite an existing binding in the scope where it lives, walking
    /// the chain outward. returns false if the name is bound nowhere;
    /// `set!` never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if self.vars.contains_key(name) {
            self.vars.insert(name.to_owned(), value);
            true
        } else {
            match &self.parent {
                Some(parent) => parent.borrow_mut().assign(name, value),
                None => false,
            }
        }
    }
}

// }}}
