use std::path::Path;
use std::process::{Command, Output};

use matrix_snippet_mcp::{dispatcher::resolve_template, snippets::Operation};

const SOURCE: &str = "#include <vector>\nusing namespace std;\n";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_matrix-snippet-mcp"))
        .args(args)
        .env_remove("LOG_LOCATION")
        .env_remove("MCP_SESSION_STORAGE_PATH")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn scratch_file(dir: &Path) -> String {
    let path = dir.join("main.cpp");
    std::fs::write(&path, SOURCE).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn insert_without_a_file_reports_no_active_target() {
    let output = run(&["insert", "addition"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: No document is open. Open a file to insert code!"),
        "{stderr}"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn insert_at_an_offset_saves_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = scratch_file(dir.path());

    let offset = SOURCE.find("using").unwrap();
    let output = run(&["insert", "determinant", &file, "--offset", &offset.to_string()]);
    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stderr).contains("C++ code inserted!"));

    let template = resolve_template(Operation::Inverse);
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        format!("{}{template}{}", &SOURCE[..offset], &SOURCE[offset..])
    );
}

#[test]
fn insert_at_a_line_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let file = scratch_file(dir.path());

    let output = run(&["insert", "multiplication", &file, "--line", "2"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        format!("{SOURCE}{}", resolve_template(Operation::Multiplication))
    );
}

#[test]
fn offset_and_line_cannot_be_combined() {
    let dir = tempfile::tempdir().unwrap();
    let file = scratch_file(dir.path());

    let output = run(&["insert", "addition", &file, "--line", "0", "--offset", "3"]);
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), SOURCE);
}

#[test]
fn out_of_range_cursor_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let file = scratch_file(dir.path());

    let output = run(&["insert", "addition", &file, "--line", "7"]);
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), SOURCE);
}

#[test]
fn show_prints_the_template() {
    let output = run(&["show", "subtraction"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        resolve_template(Operation::Subtraction)
    );
}
