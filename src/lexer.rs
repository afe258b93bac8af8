use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::ast::Num;
use crate::errors::ParseError;

/// a 1-based source location, tracked per token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// the “bits” of syntax handed to the parser. numbers carry their decoded
/// value, strings their unescaped text; everything carries where it started.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftParen(Pos),
    RightParen(Pos),
    Number(Num, Pos),
    Str(String, Pos),
    Symbol(String, Pos),
    Eof(Pos),
}

impl Token {
    pub fn pos(&self) -> Pos {
        match self {
            Token::LeftParen(pos)
            | Token::RightParen(pos)
            | Token::Number(_, pos)
            | Token::Str(_, pos)
            | Token::Symbol(_, pos)
            | Token::Eof(pos) => *pos,
        }
    }
}

/// a lazy tokenizer over a borrowed source string. cheap to construct, so a
/// caller can always restart by building a fresh one over the same source.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// the position the next token would start at
    pub fn here(&self) -> Pos {
        Pos {
            line: self.line,
            column: self.column,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn lex_string(&mut self, start: Pos) -> Result<Token, ParseError> {
        let mut text = String::new();
        let mut escaped = false;

        while let Some(c) = self.bump() {
            if escaped {
                escaped = false;
                // `\"` is the only recognized escape; any other backslash
                // passes through untouched
                if c != '"' {
                    text.push('\\');
                }
                text.push(c);
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                return Ok(Token::Str(text, start));
            } else {
                text.push(c);
            }
        }

        Err(ParseError::UnterminatedString(start))
    }

    fn lex_item(&mut self, first: char, start: Pos) -> Token {
        let mut item = String::new();
        item.push(first);

        while let Some(&c) = self.chars.peek() {
            if c == '(' || c == ')' || c == '"' || c == ';' || c.is_whitespace() {
                break;
            }
            item.push(c);
            self.bump();
        }

        // an item that parses fully as an integer or a float is a number;
        // everything else is a symbol (`#t`/`#f` resolve in the parser)
        if let Ok(n) = item.parse::<i64>() {
            Token::Number(Num::Int(n), start)
        } else if let Ok(x) = item.parse::<f64>() {
            Token::Number(Num::Float(x), start)
        } else {
            Token::Symbol(item, start)
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let start = self.here();
            match self.bump() {
                None => {
                    self.finished = true;
                    return Some(Ok(Token::Eof(start)));
                }

                Some(c) if c.is_whitespace() => continue,

                // `;` comments run to the end of the line
                Some(';') => {
                    while let Some(&next) = self.chars.peek() {
                        if next == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }

                Some('(') => return Some(Ok(Token::LeftParen(start))),
                Some(')') => return Some(Ok(Token::RightParen(start))),
                Some('"') => return Some(self.lex_string(start)),
                Some('\'') => return Some(Ok(Token::Symbol("'".to_owned(), start))),
                Some(c) => return Some(Ok(self.lex_item(c, start))),
            }
        }
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .collect::<Result<Vec<Token>, ParseError>>()
            .expect("lexing failed")
    }

    #[test]
    fn empty_source_yields_only_eof() {
        assert_eq!(tokens(""), vec![Token::Eof(Pos { line: 1, column: 1 })]);
    }

    #[test]
    fn tracks_lines_and_columns() {
        let toks = tokens("\n(define x 10)");
        assert_eq!(
            toks,
            vec![
                Token::LeftParen(Pos { line: 2, column: 1 }),
                Token::Symbol("define".to_owned(), Pos { line: 2, column: 2 }),
                Token::Symbol("x".to_owned(), Pos { line: 2, column: 9 }),
                Token::Number(Num::Int(10), Pos { line: 2, column: 11 }),
                Token::RightParen(Pos { line: 2, column: 13 }),
                Token::Eof(Pos { line: 2, column: 14 }),
            ]
        );
    }

    #[test]
    fn classifies_numbers_and_symbols() {
        let toks = tokens("1.5 -3 +4 -x #t");
        assert_eq!(toks.len(), 6);
        assert_eq!(toks[0], Token::Number(Num::Float(1.5), toks[0].pos()));
        assert_eq!(toks[1], Token::Number(Num::Int(-3), toks[1].pos()));
        assert_eq!(toks[2], Token::Number(Num::Int(4), toks[2].pos()));
        assert_eq!(toks[3], Token::Symbol("-x".to_owned(), toks[3].pos()));
        // booleans lex as symbols; the parser turns them into Bool nodes
        assert_eq!(toks[4], Token::Symbol("#t".to_owned(), toks[4].pos()));
    }

    #[test]
    fn decodes_string_escapes() {
        let toks = tokens(r#""a \"b\" c""#);
        assert_eq!(
            toks[0],
            Token::Str("a \"b\" c".to_owned(), Pos { line: 1, column: 1 })
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let result: Result<Vec<Token>, ParseError> = Lexer::new("(cat \"oops)").collect();
        match result {
            Err(ParseError::UnterminatedString(pos)) => {
                assert_eq!(pos, Pos { line: 1, column: 6 });
            }
            other => panic!("expected UnterminatedString, got {:?}", other),
        }
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let toks = tokens("1 ; the rest is ignored (even parens\n2");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0], Token::Number(Num::Int(1), toks[0].pos()));
        assert_eq!(toks[1], Token::Number(Num::Int(2), Pos { line: 2, column: 1 }));
    }

    #[test]
    fn restartable_over_the_same_source() {
        let source = "(+ 1 2)";
        assert_eq!(tokens(source), tokens(source));
    }
}
// }}}
