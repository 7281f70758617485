use crate::document::CursorPosition;
use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::{anyhow, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Open a file as the document that snippets are inserted into
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "open_document")]
pub struct OpenDocument {
    /// Path to the file.
    /// If a context has been set, this can be relative to it.
    pub file_path: String,

    /// Zero-based line to place the cursor on. Defaults to the start of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Zero-based column, counted in characters. Defaults to the start of the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl WithExamples for OpenDocument {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![
            Example {
                description: "Open a file with the cursor at the top",
                item: Self {
                    file_path: "src/matrix.cpp".into(),
                    line: None,
                    column: None,
                },
            },
            Example {
                description: "Open a file with the cursor at the start of line 12",
                item: Self {
                    file_path: "/home/user/lab3/main.cpp".into(),
                    line: Some(12),
                    column: None,
                },
            },
        ])
    }
}

impl Tool for OpenDocument {
    const NAME: &'static str = "open_document";

    fn execute(self, state: &mut SnippetTools) -> Result<String> {
        let Self {
            file_path,
            line,
            column,
        } = self;

        let position = match (line, column) {
            (None, None) => None,
            (Some(line), column) => Some(CursorPosition::new(line, column.unwrap_or(0))),
            (None, Some(_)) => return Err(anyhow!("column requires a line")),
        };

        let document = state.open_document(&file_path, position)?;
        let CursorPosition { line, column } = document.cursor_position();
        let path = document
            .path()
            .map(|path| path.display().to_string())
            .unwrap_or(file_path);

        Ok(format!(
            "Opened {path} ({} lines). Cursor at line {line}, column {column}.",
            document.line_count()
        ))
    }
}
