//! Black-box end-to-end tests (§13) driving the compiled `cc0` binary over
//! small source snippets, covering §8's six concrete scenarios. Assertions
//! are on exit code and stdout/stderr text, never on the generated
//! assembly's exact register allocation.

use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).expect("failed to write fixture source");
    path
}

/// Compiles `source` to a binary at `output` via the `-o` form, returning
/// the `cc0` process's own assert for CLI-level checks.
fn compile(source: &str, dir: &Path, output: &Path) -> assert_cmd::assert::Assert {
    let input = write_source(dir, "main.c", source);
    AssertCommand::cargo_bin("cc0")
        .expect("cc0 binary should build")
        .arg(&input)
        .arg(output)
        .arg("-o")
        .assert()
}

#[test]
fn nested_calls_return_twenty_five() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("a.out");
    compile("int sq(int x){return x*x;} int main(){return sq(5);}", dir.path(), &output).success();

    let status = Command::new(&output).status().expect("failed to run compiled binary");
    assert_eq!(status.code(), Some(25));
}

#[test]
fn while_if_and_break_return_five() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("a.out");
    compile(
        "int main(){int i=0; while(i<10){ if(i==5){break;} i=i+1;} return i;}",
        dir.path(),
        &output,
    )
    .success();

    let status = Command::new(&output).status().expect("failed to run compiled binary");
    assert_eq!(status.code(), Some(5));
}

#[test]
fn string_literal_and_pointer_walk_prints_hi_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("a.out");
    compile(
        "int puts2(int* s){while(*s){putchar(*s); s=s+1;} return 0;} int main(){puts2(\"hi\\n\"); return 0;}",
        dir.path(),
        &output,
    )
    .success();

    let run = Command::new(&output).output().expect("failed to run compiled binary");
    assert_eq!(run.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&run.stdout), "hi\n");
}

#[test]
fn two_dimensional_array_allocation_prints_eight_rows_and_returns_sixty_nine() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("a.out");
    compile(
        "int main() { \
             int** a; int i; int j; \
             a = malloc(8 * sizeof(i)); \
             i = 0; \
             while (i < 8) { \
                 a[i] = malloc(8 * sizeof(i)); \
                 j = 0; \
                 while (j < 8) { a[i][j] = 65 + i + j; j = j + 1; } \
                 i = i + 1; \
             } \
             i = 0; \
             while (i < 8) { \
                 j = 0; \
                 while (j < 8) { putchar(a[i][j]); j = j + 1; } \
                 putchar(10); \
                 i = i + 1; \
             } \
             return 69; \
         }",
        dir.path(),
        &output,
    )
    .success();

    let run = Command::new(&output).output().expect("failed to run compiled binary");
    assert_eq!(run.status.code(), Some(69));
    let expected: String = (0..8)
        .map(|i| {
            let mut row: String = (0..8).map(|j| (b'A' + i + j) as char).collect();
            row.push('\n');
            row
        })
        .collect();
    assert_eq!(String::from_utf8_lossy(&run.stdout), expected);
}

#[test]
fn unknown_escape_is_rejected_at_exit_code_three() {
    let dir = TempDir::new().unwrap();
    let input = write_source(dir.path(), "main.c", "int main(){return '\\q';}");
    let output = dir.path().join("a.out");

    AssertCommand::cargo_bin("cc0")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .arg("-o")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown escape"));
}

#[test]
fn undeclared_variable_is_rejected_at_exit_code_three() {
    let dir = TempDir::new().unwrap();
    let input = write_source(dir.path(), "main.c", "int main(){return x;}");
    let output = dir.path().join("a.out");

    AssertCommand::cargo_bin("cc0")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .arg("-o")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("x"));
}

#[test]
fn one_argument_form_writes_assembly_next_to_the_source() {
    let dir = TempDir::new().unwrap();
    let input = write_source(dir.path(), "main.c", "int main(){return 0;}");

    AssertCommand::cargo_bin("cc0").unwrap().arg(&input).assert().success();

    assert!(dir.path().join("main.s").exists());
}

#[test]
fn a_malformed_argument_shape_prints_usage_and_exits_one() {
    AssertCommand::cargo_bin("cc0")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("usage"));
}
