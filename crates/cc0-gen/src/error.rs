//! Typed internal error for the code generator (§10, §7). Everything this
//! phase emits is guaranteed well-formed by `cc0-sem` before it ever reaches
//! here, so the only genuinely fallible operation left is writing to the
//! output stream; a violation of one of `cc0-sem`'s guarantees is an
//! implementation bug (`panic!`/`unreachable!`), not a `CodeGenError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("failed to write assembly output: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
