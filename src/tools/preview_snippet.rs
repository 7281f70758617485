use crate::dispatcher::resolve_template;
use crate::snippets::Operation;
use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Show the text a snippet would insert, without inserting it
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "preview_snippet")]
pub struct PreviewSnippet {
    /// Which snippet to show
    pub operation: Operation,
}

impl WithExamples for PreviewSnippet {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "Preview the matrix inverse functions",
            item: Self {
                operation: Operation::Inverse,
            },
        }])
    }
}

impl Tool for PreviewSnippet {
    const NAME: &'static str = "preview_snippet";

    fn execute(self, _state: &mut SnippetTools) -> Result<String> {
        Ok(resolve_template(self.operation).to_string())
    }
}
