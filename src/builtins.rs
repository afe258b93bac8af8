use failure::Error;
use itertools::join;
use std::cmp::Ordering;

use crate::ast::Num;
use crate::errors::RunError;
use crate::eval;
use crate::values::Value::{self, *};
use crate::values::BuiltinFn;

/// the language's standard library: an explicit, enumerated table of every
/// builtin binding, installed into the root environment at startup. builtins
/// receive already-evaluated arguments and never see the environment.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("+",           add),
    ("-",           sub),
    ("*",           mul),
    ("/",           div),
    ("modulo",      modulo),
    (">",           gt),
    (">=",          geq),
    ("<",           lt),
    ("<=",          leq),
    ("=",           eq),
    ("eq?",         is_eq),
    ("equal?",      is_equal),
    ("not",         not),
    ("car",         car),
    ("cdr",         cdr),
    ("cons",        cons),
    ("list",        list),
    ("length",      length),
    ("map",         map),
    ("reduce",      reduce),
    ("apply",       apply),
    ("number?",     is_number),
    ("list?",       is_list),
    ("str?",        is_str),
    ("symbol?",     is_symbol),
    ("boolean?",    is_boolean),
    ("null?",       is_null),
    ("procedure?",  is_procedure),
    ("max",         max),
    ("min",         min),
    ("round",       round),
    ("cat",         cat),
    ("uppercase",   uppercase),
    ("lowercase",   lowercase),
];

// {{{ helpful macros
/// return from a function if the Vec $args doesn't contain $num elements
macro_rules! check_num_args {
    ($args: ident, $num: expr, $name: expr) => {{
        if $args.len() != $num {
            Err(RunError::WrongNumArgs {
                name: $name.to_string(),
                expected: $num,
                got: $args.len(),
            })
        } else {
            Ok(())
        }
    }};
}

/// extract the inner Rust value from a lisp value, returning an Err
/// if $value is not of enum variant $variant
macro_rules! extract {
    ($value: expr, $variant:path, $proc: expr) => {{
        if let $variant(x) = $value {
            Ok(x)
        } else {
            Err(RunError::TypeError {
                name: $proc.to_string(),
                expected: stringify!($variant).to_string(),
                got: $value.get_type(),
            })
        }
    }};

    ($value: expr, &$variant:path, $proc: expr) => {{
        if let &$variant(ref a) = $value {
            Ok(a.clone())
        } else {
            Err(RunError::TypeError {
                name: $proc.to_string(),
                expected: stringify!($variant).to_string(),
                got: $value.get_type(),
            })
        }
    }};
}

/// return an Err(RunError::ProcError)
macro_rules! procerr {
    ($name: expr, $msg: expr) => {
        Err(RunError::ProcError {
            name: $name.to_string(),
            msg: $msg.to_string(),
        }
        .into())
    };
}
// }}}

// {{{ math
/// every argument must be a number
fn numbers(name: &str, args: &[Value]) -> Result<Vec<Num>, Error> {
    let mut nums = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Number(n) => nums.push(*n),
            _ => {
                return Err(RunError::TypeError {
                    name: name.to_string(),
                    expected: "Number".to_string(),
                    got: arg.get_type(),
                }
                .into())
            }
        }
    }
    Ok(nums)
}

/// do some math
/// usage: (+ <num> <num> ...)
///        (- <num> <num> ...)
///        (* <num> <num> ...)
///        (/ <num> <num> ...)
///        (modulo <num> <num>)
fn math(op: &str, args: Vec<Value>) -> Result<Value, Error> {
    if args.len() < 2 {
        return procerr!(op, "at least 2 arguments required");
    }

    let mut nums = numbers(op, &args)?;
    let mut acc = nums.remove(0);
    for n in nums {
        acc = match op {
            "+" => acc + n,
            "-" => acc - n,
            "*" => acc * n,
            "/" => {
                if n.is_zero() {
                    return Err(RunError::DivideByZero.into());
                }
                acc / n
            }
            "modulo" => {
                if n.is_zero() {
                    return Err(RunError::DivideByZero.into());
                }
                acc % n
            }
            _ => return procerr!(op, "unknown operator"),
        };
    }

    Ok(Number(acc))
}

fn add(args: Vec<Value>) -> Result<Value, Error> {
    math("+", args)
}

fn sub(args: Vec<Value>) -> Result<Value, Error> {
    math("-", args)
}

fn mul(args: Vec<Value>) -> Result<Value, Error> {
    math("*", args)
}

fn div(args: Vec<Value>) -> Result<Value, Error> {
    math("/", args)
}

fn modulo(args: Vec<Value>) -> Result<Value, Error> {
    math("modulo", args)
}

/// round a number to the nearest integer
/// usage: (round <num>)
fn round(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "round")?;
    let nums = numbers("round", &args)?;
    match nums[0] {
        Num::Int(n) => Ok(Number(Num::Int(n))),
        Num::Float(x) => Ok(Number(Num::Int(x.round() as i64))),
    }
}

/// pick the extreme of one or more numbers
/// usage: (max <num> <num> ...)
///        (min <num> <num> ...)
fn extreme(op: &str, args: Vec<Value>) -> Result<Value, Error> {
    if args.is_empty() {
        return procerr!(op, "at least 1 argument required");
    }

    let nums = numbers(op, &args)?;
    let mut best = nums[0];
    for n in &nums[1..] {
        let better = if op == "max" { *n > best } else { *n < best };
        if better {
            best = *n;
        }
    }
    Ok(Number(best))
}

fn max(args: Vec<Value>) -> Result<Value, Error> {
    extreme("max", args)
}

fn min(args: Vec<Value>) -> Result<Value, Error> {
    extreme("min", args)
}
// }}}

// {{{ logic
/// compare two values
/// usage: (= <expr> <expr>)
///        (> <num> <num>)
///        (>= <num> <num>)
///        (< <num> <num>)
///        (<= <num> <num>)
fn compare(op: &str, args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, format!("comparison `{}`", op))?;

    if op == "=" {
        return Ok(Bool(args[0] == args[1]));
    }

    let ord = args[0]
        .partial_cmp(&args[1])
        .ok_or_else(|| RunError::TypeError {
            name: op.to_string(),
            expected: "Number".to_string(),
            got: format!("{} and {}", args[0].get_type(), args[1].get_type()),
        })?;

    let result = match op {
        ">" => ord == Ordering::Greater,
        ">=" => ord != Ordering::Less,
        "<" => ord == Ordering::Less,
        "<=" => ord != Ordering::Greater,
        _ => return procerr!(op, "unknown comparison"),
    };
    Ok(Bool(result))
}

fn eq(args: Vec<Value>) -> Result<Value, Error> {
    compare("=", args)
}

fn gt(args: Vec<Value>) -> Result<Value, Error> {
    compare(">", args)
}

fn geq(args: Vec<Value>) -> Result<Value, Error> {
    compare(">=", args)
}

fn lt(args: Vec<Value>) -> Result<Value, Error> {
    compare("<", args)
}

fn leq(args: Vec<Value>) -> Result<Value, Error> {
    compare("<=", args)
}

/// identity-flavored equality: atoms compare structurally, composite values
/// only when both are the empty list
/// usage: (eq? <expr> <expr>)
fn is_eq(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "eq?")?;
    let same = match (&args[0], &args[1]) {
        (List(a), List(b)) => a.is_empty() && b.is_empty(),
        (a, b) => a == b,
    };
    Ok(Bool(same))
}

/// deep structural equality
/// usage: (equal? <expr> <expr>)
fn is_equal(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "equal?")?;
    Ok(Bool(args[0] == args[1]))
}

/// return the logical inverse of a value's truthiness
/// usage: (not <expr>)
fn not(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "not")?;
    Ok(Bool(!args[0].to_bool()))
}
// }}}

// {{{ lists
/// return the first element of a list; the empty list has none
/// usage: (car <list>)
fn car(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "car")?;

    let items: Vec<Value> = extract!(&args[0], &List, "car")?;
    items
        .into_iter()
        .next()
        .ok_or_else(|| RunError::IndexOutOfBounds("car".to_owned()).into())
}

/// return all elements of a list but the first; an error on the empty list
/// usage: (cdr <list>)
fn cdr(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "cdr")?;

    let items: Vec<Value> = extract!(&args[0], &List, "cdr")?;
    if items.is_empty() {
        return Err(RunError::IndexOutOfBounds("cdr".to_owned()).into());
    }
    Ok(List(items[1..].to_vec()))
}

/// prepend a value to a list
/// usage: (cons <value> <list>)
fn cons(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "cons")?;

    let mut items: Vec<Value> = extract!(args.pop().unwrap(), List, "cons")?;
    let value = args.pop().unwrap();
    items.insert(0, value);
    Ok(List(items))
}

/// collect the arguments into a list
/// usage: (list <expr> ...)
fn list(args: Vec<Value>) -> Result<Value, Error> {
    Ok(List(args))
}

/// get the length of a list or a string
/// usage: (length <list>)
///        (length <str>)
fn length(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "length")?;

    match &args[0] {
        List(items) => Ok(Number(Num::Int(items.len() as i64))),
        Str(s) => Ok(Number(Num::Int(s.chars().count() as i64))),
        other => procerr!(
            "length",
            format!("expected a List or Str, got a {} instead", other.get_type())
        ),
    }
}

/// call a procedure on each element of a list
/// usage: (map <proc> <list>)
fn map(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "map")?;

    let items: Vec<Value> = extract!(args.pop().unwrap(), List, "map")?;
    let proc = args.pop().unwrap();

    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        mapped.push(eval::apply_proc("map", &proc, vec![item])?);
    }
    Ok(List(mapped))
}

/// fold a list left-to-right with a two-argument procedure, seeded with the
/// list's first element
/// usage: (reduce <proc> <list>)
fn reduce(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "reduce")?;

    let items: Vec<Value> = extract!(args.pop().unwrap(), List, "reduce")?;
    let proc = args.pop().unwrap();
    if items.is_empty() {
        return procerr!("reduce", "cannot reduce an empty list");
    }

    let mut iter = items.into_iter();
    let mut acc = iter.next().unwrap();
    for item in iter {
        acc = eval::apply_proc("reduce", &proc, vec![acc, item])?;
    }
    Ok(acc)
}

/// call a procedure with a list of arguments
/// usage: (apply <proc> <arg-list>)
fn apply(mut args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 2, "apply")?;

    let call_args: Vec<Value> = extract!(args.pop().unwrap(), List, "apply")?;
    let proc = args.pop().unwrap();
    eval::apply_proc("apply", &proc, call_args)
}
// }}}

// {{{ type predicates
fn type_test(args: Vec<Value>, name: &str, test: fn(&Value) -> bool) -> Result<Value, Error> {
    check_num_args!(args, 1, name)?;
    Ok(Bool(test(&args[0])))
}

fn is_number(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "number?", |v| match v {
        Number(_) => true,
        _ => false,
    })
}

fn is_list(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "list?", |v| match v {
        List(_) => true,
        _ => false,
    })
}

fn is_str(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "str?", |v| match v {
        Str(_) => true,
        _ => false,
    })
}

fn is_symbol(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "symbol?", |v| match v {
        Symbol(_) => true,
        _ => false,
    })
}

fn is_boolean(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "boolean?", |v| match v {
        Bool(_) => true,
        _ => false,
    })
}

fn is_null(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "null?", |v| match v {
        List(items) => items.is_empty(),
        _ => false,
    })
}

fn is_procedure(args: Vec<Value>) -> Result<Value, Error> {
    type_test(args, "procedure?", |v| match v {
        Lambda(_) | Native(_) => true,
        _ => false,
    })
}
// }}}

// {{{ strings
/// concatenate values together into a string
/// usage: (cat <value> <value> ...)
fn cat(args: Vec<Value>) -> Result<Value, Error> {
    Ok(Str(join(args, "")))
}

/// translate the characters in a string to uppercase
/// usage: (uppercase <str>)
fn uppercase(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "uppercase")?;

    let string: String = extract!(&args[0], &Str, "uppercase")?;
    Ok(Str(string.to_uppercase()))
}

/// translate the characters in a string to lowercase
/// usage: (lowercase <str>)
fn lowercase(args: Vec<Value>) -> Result<Value, Error> {
    check_num_args!(args, 1, "lowercase")?;

    let string: String = extract!(&args[0], &Str, "lowercase")?;
    Ok(Str(string.to_lowercase()))
}
// }}}
