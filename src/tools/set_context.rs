use std::path::PathBuf;

use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};
use crate::types::Example;
use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Set the working context path for a session
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(rename = "set_context")]
pub struct SetContext {
    /// Directory path to set as context.
    /// Subsequent to calling this, any relative paths will be relative to this directory
    pub path: String,
}

impl WithExamples for SetContext {
    fn examples() -> Option<Vec<Example<Self>>> {
        Some(vec![Example {
            description: "setting context to a development project",
            item: Self {
                path: "/usr/local/projects/linear-algebra".into(),
            },
        }])
    }
}

impl Tool for SetContext {
    const NAME: &'static str = "set_context";

    fn execute(self, state: &mut SnippetTools) -> Result<String> {
        let path = PathBuf::from(&*shellexpand::tilde(&self.path));
        let response = format!("Set context to {}", path.display());
        state.set_context(path)?;
        Ok(response)
    }
}
