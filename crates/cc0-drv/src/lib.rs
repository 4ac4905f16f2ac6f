//! Compiler driver (§6, §12): hand-parses the three-shape CLI grammar,
//! orchestrates the fixed lex → parse → analyze → codegen pipeline over a
//! single translation unit, and optionally hands the generated assembly to
//! `gcc`. Grounded on `faxc-drv`'s `Config`/`Session` shape, reduced to the
//! single-file, single-pass model this language's §5 concurrency model
//! requires (no incremental cache, no multi-file source map).

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info, trace};

use cc0_lex::BufferedTokenStream;
use cc0_par::Parser;
use cc0_sem::Analyzer;
use cc0_util::diagnostic::E_LEX_UNEXPECTED_BYTE;
use cc0_util::{Diagnostic, Handler, Phase, Span};

/// Parsed command line, following §12's three positional forms.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub invoke_assembler: bool,
}

const USAGE: &str = "usage: cc0 <in> [out] [-o]";

impl Config {
    /// Parses `args` (not including argv[0]) per §6: one argument emits
    /// assembly next to the input; two names the output file directly;
    /// three, the third literally `-o`, routes through the assembler.
    pub fn parse(args: &[String]) -> Result<Self> {
        match args {
            [input] => Ok(Config {
                input_path: PathBuf::from(input),
                output_path: None,
                invoke_assembler: false,
            }),
            [input, output] => Ok(Config {
                input_path: PathBuf::from(input),
                output_path: Some(PathBuf::from(output)),
                invoke_assembler: false,
            }),
            [input, output, flag] if flag == "-o" => Ok(Config {
                input_path: PathBuf::from(input),
                output_path: Some(PathBuf::from(output)),
                invoke_assembler: true,
            }),
            _ => bail!("{USAGE}"),
        }
    }

    fn assembly_path(&self) -> PathBuf {
        if self.invoke_assembler {
            PathBuf::from(format!("tmp{}.s", unix_time()))
        } else {
            self.output_path
                .clone()
                .unwrap_or_else(|| self.input_path.with_extension("s"))
        }
    }
}

fn unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Runs the whole pipeline for `config`, returning an error (mapped to exit
/// code 1 by `main`) for usage/I/O failures. A lex/parse/semantic error
/// renders its own diagnostic and terminates the process directly (§7) — it
/// never reaches this function's `Result`.
pub fn run(config: &Config) -> Result<()> {
    let source = std::fs::read(&config.input_path)
        .with_context(|| format!("failed to read {}", config.input_path.display()))?;
    trace!(bytes = source.len(), path = %config.input_path.display(), "read source");

    let file_name = config.input_path.display().to_string();
    let source_text = String::from_utf8_lossy(&source).into_owned();
    let handler = Handler::new(file_name, source_text);

    let tokens = match BufferedTokenStream::lex_all(&source) {
        Ok(tokens) => tokens,
        Err(error) => handler.die(Diagnostic::new(
            Phase::Lex,
            E_LEX_UNEXPECTED_BYTE,
            error.to_string(),
            Span::new(error.line(), error.column()),
        )),
    };
    debug!("lexing complete");

    let program = Parser::new(tokens, &handler).parse_program();
    info!(functions = program.functions.len(), "parsing complete");

    let program = Analyzer::new(&handler).analyze(program);
    info!("semantic analysis complete");

    let assembly_path = config.assembly_path();
    let mut buffer = Vec::new();
    cc0_gen::generate(program, &mut buffer).context("failed to generate assembly")?;
    std::fs::write(&assembly_path, &buffer)
        .with_context(|| format!("failed to write {}", assembly_path.display()))?;
    info!(bytes = buffer.len(), path = %assembly_path.display(), "codegen complete");

    if config.invoke_assembler {
        invoke_gcc(&assembly_path, config.output_path.as_deref().expect("invoke_assembler implies output_path"))?;
        std::fs::remove_file(&assembly_path)
            .with_context(|| format!("failed to remove temporary {}", assembly_path.display()))?;
    }

    Ok(())
}

fn invoke_gcc(assembly_path: &Path, output_path: &Path) -> Result<()> {
    let status = std::process::Command::new("gcc")
        .arg(assembly_path)
        .arg("-o")
        .arg(output_path)
        .status()
        .context("failed to invoke gcc")?;
    if !status.success() {
        bail!("gcc exited with {status}");
    }
    Ok(())
}

/// Prints §6's usage line to stderr, mirroring "any other argument shape".
pub fn print_usage() {
    let _ = writeln!(std::io::stderr(), "{USAGE}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_argument_emits_assembly_next_to_the_input() {
        let config = Config::parse(&["main.c".to_string()]).unwrap();
        assert_eq!(config.input_path, PathBuf::from("main.c"));
        assert_eq!(config.output_path, None);
        assert!(!config.invoke_assembler);
        assert_eq!(config.assembly_path(), PathBuf::from("main.s"));
    }

    #[test]
    fn two_arguments_name_the_output_file_directly() {
        let config = Config::parse(&["main.c".to_string(), "main.s".to_string()]).unwrap();
        assert_eq!(config.output_path, Some(PathBuf::from("main.s")));
        assert!(!config.invoke_assembler);
    }

    #[test]
    fn three_arguments_with_a_literal_dash_o_invoke_the_assembler() {
        let config = Config::parse(&["main.c".to_string(), "main".to_string(), "-o".to_string()]).unwrap();
        assert!(config.invoke_assembler);
        assert_eq!(config.output_path, Some(PathBuf::from("main")));
    }

    #[test]
    fn any_other_shape_is_rejected() {
        assert!(Config::parse(&[]).is_err());
        assert!(Config::parse(&["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]).is_err());
        assert!(Config::parse(&["a".to_string(), "b".to_string(), "not-o".to_string()]).is_err());
    }
}
