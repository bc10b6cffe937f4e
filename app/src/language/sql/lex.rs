use std::fmt::{Display, Formatter};

use error::error::LexError;
use logos::{Lexer, Logos};

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"([ \t\r\n\f]+|--[^\n]*)")] // whitespace and line comments
#[logos(skip(r"/\*", block_comment))]
enum RawToken {
    #[token("select", ignore(ascii_case))]
    Select,
    #[token("from", ignore(ascii_case))]
    From,
    #[token("where", ignore(ascii_case))]
    Where,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("=")]
    Eq,
    #[token("!=")]
    #[token("<>")]
    Neq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Lte,
    #[token(">=")]
    Gte,
    #[token("*")]
    Asterisk,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"'([^']|'')*'")]
    StringLiteral,
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,
}

/// Skips to the end of a `/* .. */` comment, unterminated comments are a lex error.
fn block_comment(lex: &mut Lexer<RawToken>) -> Result<(), ()> {
    let end = lex.remainder().find("*/").ok_or(())?;
    lex.bump(end + 2);
    Ok(())
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Select,
    From,
    Where,
    And,
    Or,
    True,
    False,
    Null,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    Asterisk,
    Comma,
    LParen,
    RParen,
    Identifier,
    StringLiteral,
    Number,
    Eof,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Select => TokenKind::Select,
            RawToken::From => TokenKind::From,
            RawToken::Where => TokenKind::Where,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Neq => TokenKind::Neq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Lte => TokenKind::Lte,
            RawToken::Gte => TokenKind::Gte,
            RawToken::Asterisk => TokenKind::Asterisk,
            RawToken::Comma => TokenKind::Comma,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::StringLiteral => TokenKind::StringLiteral,
            RawToken::Number => TokenKind::Number,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Select => "'SELECT'",
            TokenKind::From => "'FROM'",
            TokenKind::Where => "'WHERE'",
            TokenKind::And => "'AND'",
            TokenKind::Or => "'OR'",
            TokenKind::True => "'TRUE'",
            TokenKind::False => "'FALSE'",
            TokenKind::Null => "'NULL'",
            TokenKind::Eq => "'='",
            TokenKind::Neq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Lte => "'<='",
            TokenKind::Gte => "'>='",
            TokenKind::Asterisk => "'*'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Number => "NUMBER",
            TokenKind::Eof => "<EOF>",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// How the token shows up in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "'<EOF>'".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// Source text prepared for tokenizing.
///
/// Iteration always starts from the beginning, each call to [`TokenStream::iter`]
/// hands out a fresh lazy sequence ending in a single [`TokenKind::Eof`].
pub struct TokenStream<'source> {
    source: &'source str,
    line_starts: Vec<usize>,
}

impl<'source> TokenStream<'source> {
    pub fn new(source: &'source str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        TokenStream {
            source,
            line_starts,
        }
    }

    pub fn iter(&self) -> Tokens<'_> {
        Tokens {
            lexer: RawToken::lexer(self.source),
            stream: self,
            finished: false,
        }
    }

    /// Eagerly collects every token, stopping at the first error.
    pub fn tokenize(&self) -> Result<Vec<Token>, LexError> {
        self.iter().collect()
    }

    /// Maps a byte offset to a 1-based line and a 0-based character column.
    fn position(&self, offset: usize) -> (usize, usize) {
        let index = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let start = self.line_starts[index];
        let column = self.source[start..offset].chars().count();
        (index + 1, column)
    }
}

pub struct Tokens<'a> {
    lexer: Lexer<'a, RawToken>,
    stream: &'a TokenStream<'a>,
    finished: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lexer.next() {
            Some(Ok(raw)) => {
                let (line, column) = self.stream.position(self.lexer.span().start);
                Some(Ok(Token {
                    kind: raw.into(),
                    lexeme: self.lexer.slice().to_string(),
                    line,
                    column,
                }))
            }
            Some(Err(())) => {
                self.finished = true;
                let (line, column) = self.stream.position(self.lexer.span().start);
                Some(Err(LexError::new(
                    line,
                    column,
                    format!("token recognition error at: '{}'", self.lexer.slice()),
                )))
            }
            None => {
                self.finished = true;
                let (line, column) = self.stream.position(self.stream.source.len());
                Some(Ok(Token {
                    kind: TokenKind::Eof,
                    lexeme: String::new(),
                    line,
                    column,
                }))
            }
        }
    }
}
