use failure::Error;

use crate::ast::Node;
use crate::errors::ParseError;
use crate::lexer::{Lexer, Pos, Token};

/// parse a string of source text into one syntax-tree node per top-level
/// form. parsing is pure: the same source always yields the same trees.
pub fn parse(source: &str) -> Result<Vec<Node>, Error> {
    Parser::new(source).program()
}

/// a recursive-descent parser with one token of lookahead, directly off the
/// grammar:
///
/// ```text
/// Program := SExp*
/// SExp    := Atom | List
/// Atom    := Number | String | Symbol | Boolean
/// List    := "(" SExp* ")"
/// ```
pub struct Parser<'a> {
    tokens: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Parser<'a> {
        Parser {
            tokens: Lexer::new(source),
        }
    }

    pub fn program(&mut self) -> Result<Vec<Node>, Error> {
        let mut program = Vec::new();
        loop {
            match self.next_token()? {
                Token::Eof(_) => break,
                token => program.push(self.expression(token)?),
            }
        }
        Ok(program)
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        let here = self.tokens.here();
        match self.tokens.next() {
            Some(token) => Ok(token?),
            None => Ok(Token::Eof(here)),
        }
    }

    fn expression(&mut self, token: Token) -> Result<Node, Error> {
        match token {
            Token::Number(n, pos) => Ok(Node::Number(n, pos)),
            Token::Str(s, pos) => Ok(Node::Str(s, pos)),

            Token::Symbol(s, pos) => {
                if s == "#t" {
                    Ok(Node::Bool(true, pos))
                } else if s == "#f" {
                    Ok(Node::Bool(false, pos))
                } else if s == "'" {
                    self.quoted(pos)
                } else {
                    Ok(Node::Symbol(s, pos))
                }
            }

            Token::LeftParen(pos) => self.list(pos),
            Token::RightParen(pos) => Err(ParseError::UnexpectedCloseParen(pos).into()),
            Token::Eof(pos) => Err(ParseError::UnexpectedEof(pos).into()),
        }
    }

    fn list(&mut self, open: Pos) -> Result<Node, Error> {
        let mut items = Vec::new();
        loop {
            match self.next_token()? {
                Token::RightParen(_) => return Ok(Node::List(items)),
                Token::Eof(_) => return Err(ParseError::UnclosedList(open).into()),
                token => items.push(self.expression(token)?),
            }
        }
    }

    /// '<sexp> is sugar for (quote <sexp>)
    fn quoted(&mut self, pos: Pos) -> Result<Node, Error> {
        let token = self.next_token()?;
        if let Token::Eof(eof) = token {
            return Err(ParseError::UnexpectedEof(eof).into());
        }

        let quoted = self.expression(token)?;
        Ok(Node::List(vec![
            Node::Symbol("quote".to_owned(), pos),
            quoted,
        ]))
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Num;

    fn at(line: usize, column: usize) -> Pos {
        Pos { line, column }
    }

    fn parse_ok(source: &str) -> Vec<Node> {
        parse(source).expect("parsing failed")
    }

    fn parse_err(source: &str) -> ParseError {
        let err = parse(source).expect_err("parsing should have failed");
        err.downcast::<ParseError>().expect("not a ParseError")
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        assert_eq!(parse_ok(""), Vec::<Node>::new());
    }

    #[test]
    fn bare_atoms() {
        assert_eq!(parse_ok("x"), vec![Node::Symbol("x".to_owned(), at(1, 1))]);
        assert_eq!(parse_ok("#t"), vec![Node::Bool(true, at(1, 1))]);
        assert_eq!(
            parse_ok("\"hi\""),
            vec![Node::Str("hi".to_owned(), at(1, 1))]
        );
    }

    #[test]
    fn empty_list_parses_to_a_list_with_zero_elements() {
        assert_eq!(parse_ok("()"), vec![Node::List(Vec::new())]);
    }

    #[test]
    fn define_form_with_positions() {
        assert_eq!(
            parse_ok("(define x 100)"),
            vec![Node::List(vec![
                Node::Symbol("define".to_owned(), at(1, 2)),
                Node::Symbol("x".to_owned(), at(1, 9)),
                Node::Number(Num::Int(100), at(1, 11)),
            ])]
        );
    }

    #[test]
    fn nested_lambda_form() {
        assert_eq!(
            parse_ok("(define f (lambda (x y) (+ x y)))"),
            vec![Node::List(vec![
                Node::Symbol("define".to_owned(), at(1, 2)),
                Node::Symbol("f".to_owned(), at(1, 9)),
                Node::List(vec![
                    Node::Symbol("lambda".to_owned(), at(1, 12)),
                    Node::List(vec![
                        Node::Symbol("x".to_owned(), at(1, 20)),
                        Node::Symbol("y".to_owned(), at(1, 22)),
                    ]),
                    Node::List(vec![
                        Node::Symbol("+".to_owned(), at(1, 26)),
                        Node::Symbol("x".to_owned(), at(1, 28)),
                        Node::Symbol("y".to_owned(), at(1, 30)),
                    ]),
                ]),
            ])]
        );
    }

    #[test]
    fn one_node_per_top_level_form() {
        let program = parse_ok("\n(define x 10)\n(define y 10)\n(define b #t)");
        assert_eq!(program.len(), 3);
        assert_eq!(
            program[2],
            Node::List(vec![
                Node::Symbol("define".to_owned(), at(4, 2)),
                Node::Symbol("b".to_owned(), at(4, 9)),
                Node::Bool(true, at(4, 11)),
            ])
        );
    }

    #[test]
    fn quote_sugar_desugars_to_a_quote_form() {
        assert_eq!(
            parse_ok("'(1 2)"),
            vec![Node::List(vec![
                Node::Symbol("quote".to_owned(), at(1, 1)),
                Node::List(vec![
                    Node::Number(Num::Int(1), at(1, 3)),
                    Node::Number(Num::Int(2), at(1, 5)),
                ]),
            ])]
        );
        assert_eq!(
            parse_ok("'x"),
            vec![Node::List(vec![
                Node::Symbol("quote".to_owned(), at(1, 1)),
                Node::Symbol("x".to_owned(), at(1, 2)),
            ])]
        );
    }

    #[test]
    fn unexpected_close_paren_fails() {
        match parse_err(")") {
            ParseError::UnexpectedCloseParen(pos) => assert_eq!(pos, at(1, 1)),
            other => panic!("expected UnexpectedCloseParen, got {:?}", other),
        }
    }

    #[test]
    fn unclosed_list_fails_with_the_opening_position() {
        match parse_err("(define x 100") {
            ParseError::UnclosedList(pos) => assert_eq!(pos, at(1, 1)),
            other => panic!("expected UnclosedList, got {:?}", other),
        }
        match parse_err("(car '(1 2)") {
            ParseError::UnclosedList(pos) => assert_eq!(pos, at(1, 1)),
            other => panic!("expected UnclosedList, got {:?}", other),
        }
    }

    #[test]
    fn parsing_is_deterministic() {
        let source = "(define f (lambda (x) (* x x)))\n(f 4)";
        assert_eq!(parse_ok(source), parse_ok(source));
    }
}
// }}}
