use crate::document::CursorPosition;
use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Move the cursor of the open document
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "set_cursor")]
pub struct SetCursor {
    /// Zero-based line
    pub line: usize,
    /// Zero-based column, counted in characters
    pub column: usize,
}

impl WithExamples for SetCursor {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Place the cursor at the start of the fifth line",
            item: Self { line: 4, column: 0 },
        }])
    }
}

impl Tool for SetCursor {
    const NAME: &'static str = "set_cursor";

    fn execute(self, state: &mut SnippetTools) -> Result<String> {
        let Self { line, column } = self;
        let offset = state.set_cursor(CursorPosition::new(line, column))?;
        Ok(format!(
            "Cursor at line {line}, column {column} (offset {offset})"
        ))
    }
}
