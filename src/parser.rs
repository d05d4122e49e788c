//! Parse-and-validate boundary between raw user text and the typed engine inputs.
//!
//! Lists are comma-separated signed integers with arbitrary whitespace, e.g.
//! `"7, 0, 1, 2"`. Anything else is reported as [`SimError::InvalidInput`].

use std::{fmt, iter::Peekable, str::Chars};

use crate::error::{Result, SimError};

/// Parses a non-empty comma-separated list of integers.
pub fn parse_int_list(text: &str) -> Result<Vec<i64>> {
    Parser::new(text).int_list()
}

/// Parses a single integer that must be at least 1, such as a frame count or quantum.
pub fn parse_positive(text: &str, what: &str) -> Result<usize> {
    let value = Parser::new(text)
        .single_int()
        .map_err(|e| SimError::invalid(format!("{what}: {}", reason(&e))))?;
    usize::try_from(value)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| SimError::invalid(format!("{what} must be at least 1, got {value}")))
}

fn reason(err: &SimError) -> String {
    match err {
        SimError::InvalidInput { reason } => reason.clone(),
        other => other.to_string(),
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(string: &'a str) -> Self {
        Self {
            lexer: Lexer::new(string),
        }
    }

    fn int_list(&mut self) -> Result<Vec<i64>> {
        if self.lexer.current_token.is_none() {
            return Err(SimError::invalid(
                "expected a comma-separated list of integers, got nothing",
            ));
        }
        let mut list = Vec::new();
        list.push(self.lexer.eat_int_constant()?);
        while self.lexer.match_delim(Lexer::COMMA) {
            self.lexer.eat_delim(Lexer::COMMA)?;
            list.push(self.lexer.eat_int_constant()?);
        }
        self.expect_end()?;
        Ok(list)
    }

    fn single_int(&mut self) -> Result<i64> {
        let value = self.lexer.eat_int_constant()?;
        self.expect_end()?;
        Ok(value)
    }

    fn expect_end(&self) -> Result<()> {
        match &self.lexer.current_token {
            None => Ok(()),
            Some(token) => Err(SimError::invalid(format!("unexpected {token}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    IntConstant(i64),
    Delimiter(char),
    /// A run of characters that is neither an integer nor a delimiter.
    Invalid(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntConstant(i) => write!(f, "integer {i}"),
            Token::Delimiter(c) => write!(f, "'{c}'"),
            Token::Invalid(s) => write!(f, "'{s}' (not an integer)"),
        }
    }
}

struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    current_token: Option<Token>,
}

impl<'a> Lexer<'a> {
    const COMMA: char = ',';

    fn new(string: &'a str) -> Self {
        let mut lexer = Self {
            input: string.chars().peekable(),
            current_token: None,
        };
        lexer.next_token();
        lexer
    }

    /// Consumes characters up to the next delimiter or whitespace.
    fn parse_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.input.peek() {
            if c == Self::COMMA || c.is_whitespace() {
                break;
            }
            word.push(c);
            self.input.next();
        }
        word
    }

    fn parse_number(&mut self) -> Token {
        let word = self.parse_word();
        let digits = word.strip_prefix(['-', '+']).unwrap_or(&word);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Token::Invalid(word);
        }
        match word.parse() {
            Ok(i) => Token::IntConstant(i),
            Err(_) => Token::Invalid(word),
        }
    }

    /// Returns the next token from the input stream.
    fn next_token(&mut self) -> Option<Token> {
        while self.input.next_if(|c| c.is_whitespace()).is_some() {}
        let c = self.input.peek().cloned();
        let token = match c {
            None => None,
            Some(Self::COMMA) => {
                self.input.next();
                Some(Token::Delimiter(Self::COMMA))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => Some(self.parse_number()),
            Some(_) => Some(Token::Invalid(self.parse_word())),
        };
        self.current_token = token.clone();
        token
    }

    fn match_delim(&self, ch: char) -> bool {
        matches!(self.current_token, Some(Token::Delimiter(d)) if d == ch)
    }

    fn eat_delim(&mut self, ch: char) -> Result<()> {
        if !self.match_delim(ch) {
            return Err(self.unexpected(&format!("'{ch}'")));
        }
        self.next_token();
        Ok(())
    }

    fn eat_int_constant(&mut self) -> Result<i64> {
        let Some(Token::IntConstant(i)) = self.current_token else {
            return Err(self.unexpected("an integer"));
        };
        self.next_token();
        Ok(i)
    }

    fn unexpected(&self, expected: &str) -> SimError {
        match &self.current_token {
            Some(token) => SimError::invalid(format!("expected {expected}, found {token}")),
            None => SimError::invalid(format!("expected {expected}, found end of input")),
        }
    }
}
