//! Eager token buffering (§4.3): the parser needs unbounded lookahead (it
//! back-patches `if`/`else` and re-derives operator arity), so the whole
//! token stream is drained up front rather than pulled lazily.

use cc0_util::{Diagnostic, DiagnosticCode, Handler, Phase, Span};

use crate::error::LexError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct BufferedTokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl BufferedTokenStream {
    /// Lexes `source` in full. Returns the first `LexError` encountered;
    /// lexing does not attempt to recover past one (§7: lexical errors are
    /// fatal).
    pub fn lex_all(source: &[u8]) -> Result<Self, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(Self { tokens, cursor: 0 })
    }

    /// Looks at the token `offset` positions ahead of the cursor without
    /// consuming anything. Past the end of the stream this keeps returning
    /// the trailing `Eof` token.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    pub fn eof(&self) -> bool {
        self.peek(0).kind == TokenKind::Eof
    }

    /// Renders a parse-time diagnostic positioned at the *start* of the
    /// current token (§4.3): tokens record their last-byte position, so the
    /// start column is recovered by walking back `text.len()` bytes, with a
    /// special case for `Eof`'s empty text.
    pub fn die(&self, handler: &Handler, code: DiagnosticCode, message: impl Into<String>) -> ! {
        let token = self.peek(0);
        let start_column = token.column.saturating_sub(token.text.len() as u32);
        let span = Span::new(token.line, start_column);
        let diagnostic = Diagnostic::new(Phase::Parse, code, message.into(), span);
        handler.die(diagnostic)
    }
}
