use std::borrow::Cow;

use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Close the open document
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "close_document")]
pub struct CloseDocument {}

impl JsonSchema for CloseDocument {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("close_document")
    }

    fn json_schema(_gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "title": "close_document",
            "description": "Close the open document. Insertion commands fail until another is opened.",
            "type": "object",
            "properties": {}
        })
    }
}

impl WithExamples for CloseDocument {}

impl Tool for CloseDocument {
    const NAME: &'static str = "close_document";

    fn execute(self, state: &mut SnippetTools) -> Result<String> {
        Ok(match state.close_document()? {
            Some(path) => format!("Closed {}", path.display()),
            None => String::from("No document was open"),
        })
    }
}
