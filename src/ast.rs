use itertools::join;
use std::fmt;

use crate::lexer::Pos;

/// the numeric half of the language: integers and floats, promoted to float
/// whenever they mix. the operator impls live in `arithmetic`.
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Num::Int(n) => n == 0,
            Num::Float(x) => x == 0.0,
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Num::Int(n) => write!(f, "{}", n),
            Num::Float(x) => write!(f, "{}", x),
        }
    }
}

/// a node of the syntax tree, immutable once parsed. a list stands for both
/// call forms and literal list data; which one it is only becomes clear
/// during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Num, Pos),
    Str(String, Pos),
    Bool(bool, Pos),
    Symbol(String, Pos),
    List(Vec<Node>),
}

impl Node {
    /// the human-friendly kind of a node, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Number(..) => "Number",
            Node::Str(..) => "Str",
            Node::Bool(..) => "Bool",
            Node::Symbol(..) => "Symbol",
            Node::List(_) => "List",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number(n, _) => write!(f, "{}", n),
            Node::Str(s, _) => write!(f, "\"{}\"", s),
            Node::Bool(true, _) => write!(f, "#t"),
            Node::Bool(false, _) => write!(f, "#f"),
            Node::Symbol(s, _) => write!(f, "{}", s),
            Node::List(items) => write!(f, "({})", join(items.iter(), " ")),
        }
    }
}
