//! Typed lexical errors (§7: exit code 2 per §6's canonical table).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedByte { line: u32, column: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnexpectedByte { line, .. } => *line,
        }
    }

    pub fn column(&self) -> u32 {
        match self {
            LexError::UnexpectedByte { column, .. } => *column,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
