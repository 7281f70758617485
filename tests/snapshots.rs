use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use matrix_snippet_mcp::{state::SnippetTools, types::McpRequest};
use serde_json::{json, Value};

/// Each directory under tests/snapshots holds `input.cpp`, the `calls.json` tool calls to run
/// against it, and the expected `output.cpp`. Set UPDATE_SNAPSHOTS to rewrite the outputs.
#[test]
fn run_snapshot_tests() {
    let update_mode = env::var("UPDATE_SNAPSHOTS").is_ok();
    let test_filter = env::var("TEST_FILTER").ok();

    let mut failures = vec![];
    let mut ran = 0;
    for dir in discover_tests(Path::new("tests/snapshots")).expect("could not read snapshots") {
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        if test_filter.as_deref().is_some_and(|filter| !name.contains(filter)) {
            continue;
        }
        ran += 1;

        match run_snapshot(&dir) {
            Ok(actual) => {
                let expected_path = dir.join("output.cpp");
                if update_mode {
                    fs::write(&expected_path, &actual).unwrap();
                    println!("📝 updated {name}");
                } else if fs::read_to_string(&expected_path).ok().as_deref() == Some(&*actual) {
                    println!("✅ {name}");
                } else {
                    println!("❌ {name}: output differs\n{actual}");
                    failures.push(name);
                }
            }
            Err(e) => {
                println!("❌ {name}: {e}");
                failures.push(name);
            }
        }
    }

    assert!(ran > 0, "no snapshot tests found");
    if !failures.is_empty() {
        panic!("❌ {} snapshot test(s) failed: {failures:?}", failures.len());
    }
}

fn discover_tests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = fs::read_dir(root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    dirs.retain(|dir| dir.join("calls.json").exists());
    dirs.sort();
    Ok(dirs)
}

fn run_snapshot(dir: &Path) -> Result<String> {
    let scratch = tempfile::tempdir()?;
    let input_path = scratch.path().join("input.cpp");
    fs::copy(dir.join("input.cpp"), &input_path)?;

    let mut state = SnippetTools::new(None)?;
    state.set_context(scratch.path().to_path_buf())?;

    let calls: Vec<Value> = serde_json::from_str(&fs::read_to_string(dir.join("calls.json"))?)?;
    for (id, call) in calls.into_iter().enumerate() {
        let request = McpRequest {
            jsonrpc: "2.0".into(),
            id: json!(id),
            method: "tools/call".into(),
            params: Some(call),
        };
        let response = serde_json::to_value(request.execute(&mut state, None))?;
        if let Some(error) = response.get("error") {
            return Err(anyhow!("call {id} failed: {}", error["message"]));
        }
    }

    Ok(fs::read_to_string(input_path)?)
}
