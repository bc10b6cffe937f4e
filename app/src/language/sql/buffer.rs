use error::error::SyntaxError;

use crate::language::sql::lex::{Token, TokenKind, Tokens};

/// Token source with pushback, so the parser can look one token ahead.
pub struct BufferedLexer<'source> {
    lexer: Tokens<'source>,
    buffer: Vec<Token>,
    eof: Option<Token>,
}

impl<'source> BufferedLexer<'source> {
    pub(crate) fn new(lexer: Tokens<'source>) -> Self {
        BufferedLexer {
            lexer,
            buffer: vec![],
            eof: None,
        }
    }

    pub(crate) fn buffer(&mut self, token: Token) {
        self.buffer.push(token);
    }

    pub fn next(&mut self) -> Result<Token, SyntaxError> {
        if let Some(token) = self.buffer.pop() {
            return Ok(token);
        }

        match self.lexer.next() {
            Some(Ok(token)) => {
                if token.is(TokenKind::Eof) {
                    self.eof = Some(token.clone());
                }
                Ok(token)
            }
            Some(Err(err)) => Err(err.into()),
            // the stream is exhausted once EOF went out, keep answering with it
            None => self
                .eof
                .clone()
                .ok_or_else(|| SyntaxError::new(1, 0, "token stream ended without EOF")),
        }
    }

    pub fn peek(&mut self) -> Result<&Token, SyntaxError> {
        if self.buffer.is_empty() {
            let token = self.next()?;
            self.buffer(token);
        }
        self.buffer
            .last()
            .ok_or_else(|| SyntaxError::new(1, 0, "empty token buffer"))
    }

    /// Consumes the next token if it has the given kind.
    pub fn next_if(&mut self, kind: TokenKind) -> Result<Option<Token>, SyntaxError> {
        if self.peek()?.is(kind) {
            return self.next().map(Some);
        }
        Ok(None)
    }
}
