use failure::Error;

use crate::ast::Node;
use crate::env::EnvRef;
use crate::errors::RunError;
use crate::values::{Closure, Value};

/// evaluate a syntax-tree node against an environment
pub fn eval(node: &Node, env: EnvRef) -> Result<Value, Error> {
    match node {
        Node::Number(n, _) => Ok(Value::Number(*n)),
        Node::Str(s, _) => Ok(Value::Str(s.clone())),
        Node::Bool(b, _) => Ok(Value::Bool(*b)),

        Node::Symbol(name, pos) => env.borrow().get(name).ok_or_else(|| {
            RunError::UnboundSymbol {
                name: name.clone(),
                pos: *pos,
            }
            .into()
        }),

        Node::List(items) => {
            if items.is_empty() {
                // the empty list is the nil value and evaluates to itself
                Ok(Value::List(Vec::new()))
            } else {
                eval_form(items, env)
            }
        }
    }
}

/// evaluate a non-empty list: either a special form or a procedure call
fn eval_form(items: &[Node], env: EnvRef) -> Result<Value, Error> {
    // special forms shadow every binding unconditionally
    if let Node::Symbol(name, _) = &items[0] {
        match name.as_str() {
            "define" => return define(items, env),
            "if" => return if_form(items, env),
            "quote" => return quote(items),
            "set!" => return assign(items, env),
            "lambda" => return lambda(items, env),
            _ => {}
        }
    }

    let proc = eval(&items[0], env.clone())?;
    let args = eval_list(&items[1..], env)?;
    let name = match &items[0] {
        Node::Symbol(name, _) => name.clone(),
        _ => proc.to_string(),
    };
    apply_proc(&name, &proc, args)
}

/// invoke a procedure value with already-evaluated arguments. `name` is only
/// used in error messages.
pub fn apply_proc(name: &str, proc: &Value, args: Vec<Value>) -> Result<Value, Error> {
    match proc {
        Value::Native(native) => (native.func)(args),
        Value::Lambda(closure) => closure.call(name, args),
        _ => Err(RunError::UncallableValue {
            name: name.to_owned(),
            typename: proc.get_type(),
        }
        .into()),
    }
}

/// evaluate a slice of nodes left-to-right
pub fn eval_list(items: &[Node], env: EnvRef) -> Result<Vec<Value>, Error> {
    items.iter().map(|item| eval(item, env.clone())).collect()
}

// {{{ special forms

fn check_form_arity(name: &str, items: &[Node], expected: usize) -> Result<(), RunError> {
    if items.len() != expected + 1 {
        Err(RunError::WrongNumArgs {
            name: name.to_owned(),
            expected,
            got: items.len() - 1,
        })
    } else {
        Ok(())
    }
}

fn symbol_operand<'a>(name: &str, node: &'a Node) -> Result<&'a str, RunError> {
    if let Node::Symbol(symbol, _) = node {
        Ok(symbol)
    } else {
        Err(RunError::TypeError {
            name: name.to_owned(),
            expected: "Symbol".to_owned(),
            got: node.kind().to_owned(),
        })
    }
}

/// (define <symbol> <expr>) — bind in the current scope, overwriting silently
fn define(items: &[Node], env: EnvRef) -> Result<Value, Error> {
    check_form_arity("define", items, 2)?;

    let name = symbol_operand("define", &items[1])?.to_owned();
    let value = eval(&items[2], env.clone())?;
    env.borrow_mut().define(&name, value);
    Ok(Value::List(Vec::new()))
}

/// (if <test> <then> <else>) — only the taken branch is evaluated
fn if_form(items: &[Node], env: EnvRef) -> Result<Value, Error> {
    check_form_arity("if", items, 3)?;

    if eval(&items[1], env.clone())?.to_bool() {
        eval(&items[2], env)
    } else {
        eval(&items[3], env)
    }
}

/// (quote <expr>) — any syntax shape, returned verbatim as data
fn quote(items: &[Node]) -> Result<Value, Error> {
    check_form_arity("quote", items, 1)?;
    Ok(Value::from(&items[1]))
}

/// (set! <symbol> <expr>) — overwrite an existing binding, wherever it lives
fn assign(items: &[Node], env: EnvRef) -> Result<Value, Error> {
    check_form_arity("set!", items, 2)?;

    let name = symbol_operand("set!", &items[1])?.to_owned();
    let value = eval(&items[2], env.clone())?;
    if env.borrow_mut().assign(&name, value) {
        Ok(Value::List(Vec::new()))
    } else {
        Err(RunError::AssignUnbound(name).into())
    }
}

/// (lambda (<param>*) <body>) — capture the current environment
fn lambda(items: &[Node], env: EnvRef) -> Result<Value, Error> {
    check_form_arity("lambda", items, 2)?;

    let params = match &items[1] {
        Node::List(params) => params,
        other => {
            return Err(RunError::TypeError {
                name: "lambda".to_owned(),
                expected: "List".to_owned(),
                got: other.kind().to_owned(),
            }
            .into())
        }
    };

    let mut names = Vec::with_capacity(params.len());
    for param in params {
        names.push(symbol_operand("lambda (in params)", param)?.to_owned());
    }

    Ok(Value::Lambda(Box::new(Closure {
        params: names,
        body: items[2].clone(),
        env,
    })))
}

// }}}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Num;
    use crate::env::Env;
    use crate::parser;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(source: &str) -> Result<Value, Error> {
        let env: EnvRef = Rc::new(RefCell::new(Env::new(None)));
        let mut result = Value::List(Vec::new());
        for node in &parser::parse(source)? {
            result = eval(node, env.clone())?;
        }
        Ok(result)
    }

    fn run_ok(source: &str) -> Value {
        run(source).expect("evaluation failed")
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        assert_eq!(run_ok("42"), Value::Number(Num::Int(42)));
        assert_eq!(run_ok("\"hi\""), Value::Str("hi".to_owned()));
        assert_eq!(run_ok("#f"), Value::Bool(false));
        assert_eq!(run_ok("()"), Value::List(Vec::new()));
    }

    #[test]
    fn unbound_symbol_reports_name_and_position() {
        let err = run("\n  nope").unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::UnboundSymbol { name, pos }) => {
                assert_eq!(name, "nope");
                assert_eq!((pos.line, pos.column), (2, 3));
            }
            other => panic!("expected UnboundSymbol, got {:?}", other),
        }
    }

    #[test]
    fn quote_accepts_any_syntax_shape() {
        assert_eq!(run_ok("(quote x)"), Value::Symbol("x".to_owned()));
        assert_eq!(run_ok("(quote 3)"), Value::Number(Num::Int(3)));
        assert_eq!(
            run_ok("(quote (1 2))"),
            Value::List(vec![
                Value::Number(Num::Int(1)),
                Value::Number(Num::Int(2)),
            ])
        );
        assert_eq!(run_ok("'sym"), Value::Symbol("sym".to_owned()));
    }

    #[test]
    fn special_forms_check_their_arity() {
        for source in &["(define x)", "(if #t 1)", "(quote)", "(set! x)", "(lambda (x))"] {
            let err = run(source).unwrap_err();
            match err.downcast_ref::<RunError>() {
                Some(RunError::WrongNumArgs { .. }) => {}
                other => panic!("{}: expected WrongNumArgs, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn define_and_set_targets_must_be_symbols() {
        for source in &["(define 3 4)", "(set! \"x\" 4)", "(lambda (1) 2)"] {
            let err = run(source).unwrap_err();
            match err.downcast_ref::<RunError>() {
                Some(RunError::TypeError { .. }) => {}
                other => panic!("{}: expected TypeError, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn set_on_unbound_name_is_an_assign_error() {
        let err = run("(set! ghost 1)").unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::AssignUnbound(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected AssignUnbound, got {:?}", other),
        }
    }

    #[test]
    fn zero_and_empty_string_are_truthy() {
        assert_eq!(run_ok("(if 0 1 2)"), Value::Number(Num::Int(1)));
        assert_eq!(run_ok("(if \"\" 1 2)"), Value::Number(Num::Int(1)));
        assert_eq!(run_ok("(if () 1 2)"), Value::Number(Num::Int(2)));
        assert_eq!(run_ok("(if #f 1 2)"), Value::Number(Num::Int(2)));
    }

    #[test]
    fn calling_a_non_procedure_fails() {
        let err = run("(1 2 3)").unwrap_err();
        match err.downcast_ref::<RunError>() {
            Some(RunError::UncallableValue { typename, .. }) => {
                assert_eq!(typename, "Number");
            }
            other => panic!("expected UncallableValue, got {:?}", other),
        }
    }

    #[test]
    fn special_form_names_are_not_ordinary_bindings() {
        // `define` as a head is always the special form, even though no
        // binding named `define` exists to shadow
        assert_eq!(
            run_ok("(define if-like 7) if-like"),
            Value::Number(Num::Int(7))
        );
        let err = run("(set! define 1)").unwrap_err();
        assert!(err.downcast_ref::<RunError>().is_some());
    }

    #[test]
    fn operands_evaluate_left_to_right() {
        assert_eq!(
            run_ok("(define n 1) (list (set! n 2) n)"),
            Value::List(vec![Value::List(Vec::new()), Value::Number(Num::Int(2))])
        );
    }
}
// }}}
