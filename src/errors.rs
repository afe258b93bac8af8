use failure::Fail;

use crate::lexer::Pos;

#[derive(Debug, Fail)]
pub enum ParseError {
    #[fail(display = "syntax error: unexpected ')' at {}", _0)]
    UnexpectedCloseParen(Pos),

    #[fail(display = "syntax error: unclosed list starting at {}", _0)]
    UnclosedList(Pos),

    #[fail(display = "syntax error: unterminated string literal at {}", _0)]
    UnterminatedString(Pos),

    #[fail(display = "syntax error: unexpected end of input at {}", _0)]
    UnexpectedEof(Pos),
}

#[derive(Debug, Fail)]
pub enum RunError {
    #[fail(display = "unbound symbol `{}` at {}", name, pos)]
    UnboundSymbol { name: String, pos: Pos },

    #[fail(display = "{}: expected {} arguments, got {} instead", name, expected, got)]
    WrongNumArgs {
        name: String,
        expected: usize,
        got: usize,
    },

    #[fail(display = "{}: expected a {}, got a {} instead", name, expected, got)]
    TypeError {
        name: String,
        expected: String,
        got: String,
    },

    #[fail(display = "value `{}` (of type {}) is uncallable", name, typename)]
    UncallableValue { name: String, typename: String },

    #[fail(display = "set! on unbound symbol `{}`", _0)]
    AssignUnbound(String),

    #[fail(display = "{}: index out of range", _0)]
    IndexOutOfBounds(String),

    #[fail(display = "division by zero is undefined")]
    DivideByZero,

    #[fail(display = "{}: {}", name, msg)]
    ProcError { name: String, msg: String },
}
