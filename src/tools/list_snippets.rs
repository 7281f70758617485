use std::borrow::Cow;
use std::fmt::Write;

use crate::snippets::Operation;
use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// List the available snippets
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "list_snippets")]
pub struct ListSnippets {}

impl JsonSchema for ListSnippets {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("list_snippets")
    }

    fn json_schema(_gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "title": "list_snippets",
            "description": "List the available snippets with the command that inserts each one",
            "type": "object",
            "properties": {}
        })
    }
}

impl WithExamples for ListSnippets {}

impl Tool for ListSnippets {
    const NAME: &'static str = "list_snippets";

    fn execute(self, _state: &mut SnippetTools) -> Result<String> {
        let mut listing = String::new();
        for operation in Operation::ALL {
            writeln!(
                &mut listing,
                "{operation}: {} via `{}` (defines {})",
                operation.title(),
                operation.command_name(),
                operation.function_names().join(", ")
            )?;
        }
        Ok(listing)
    }
}
