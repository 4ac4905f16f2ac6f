//! Diagnostic reporting: one fatal error terminates the process (§7).
//!
//! Unlike the teacher's `Diagnostic`, there is no note/help/snippet
//! accumulation here — this language has no warning category and no error
//! recovery, so a `Diagnostic` is rendered and the process exits the moment
//! one is produced.

mod codes;

pub use codes::*;

use crate::Span;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    /// Unused by this language (§7 has no warning category) but kept so
    /// `Handler`'s rendering path isn't hard-wired to a single level.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// Which compiler phase a diagnostic came from, and therefore which exit
/// code it maps to per §6's External Interfaces table (the canonical
/// contract; see DESIGN.md for the §6-vs-§7 resolution).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Semantic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl Phase {
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Phase::Lex | Phase::Parse => ExitCode(2),
            Phase::Semantic => ExitCode(3),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub phase: Phase,
    pub code: DiagnosticCode,
}

impl Diagnostic {
    pub fn new(
        phase: Phase,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
            phase,
            code,
        }
    }
}

/// Owns the source buffer and file name, and renders+terminates on the
/// first fatal diagnostic. Grounded on `original_source/util/char_stream.hpp`'s
/// `die()`: one message line, the offending source line, then a caret line
/// with tabs preserved verbatim (§6).
pub struct Handler {
    file_name: String,
    source: String,
}

impl Handler {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Render `diagnostic` to a string in the exact §6 format, without
    /// exiting the process. Used by `die` and directly by tests.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}:{}:{}: {}: {}\n",
            self.file_name,
            diagnostic.span.line + 1,
            diagnostic.span.column + 1,
            diagnostic.level,
            diagnostic.message,
        ));

        let line_text = self
            .source
            .lines()
            .nth(diagnostic.span.line as usize)
            .unwrap_or("");
        out.push_str(line_text);
        out.push('\n');

        for ch in line_text.chars().take(diagnostic.span.column as usize) {
            out.push(if ch == '\t' { '\t' } else { ' ' });
        }
        out.push('^');
        out
    }

    /// Render `diagnostic` to stderr and exit the process with the phase's
    /// exit code. Never returns.
    pub fn die(&self, diagnostic: Diagnostic) -> ! {
        eprintln!("{}", self.render(&diagnostic));
        std::process::exit(diagnostic.phase.exit_code().0);
    }
}
