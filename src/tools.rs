mod close_document;
mod insert_matrix;
mod list_snippets;
mod open_document;
mod preview_snippet;
mod set_context;
mod set_cursor;

pub use close_document::CloseDocument;
pub use insert_matrix::{
    InsertMatrixAddition, InsertMatrixInverse, InsertMatrixMultiplication,
    InsertMatrixSubtraction,
};
pub use list_snippets::ListSnippets;
pub use open_document::OpenDocument;
pub use preview_snippet::PreviewSnippet;
pub use set_context::SetContext;
pub use set_cursor::SetCursor;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::state::SnippetTools;
use crate::traits::{AsToolSchema, Tool};
use crate::types::ToolSchema;

/// Parameters of a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

macro_rules! tools {
    ($($ty:ident),+ $(,)?) => {
        /// Every tool this server exposes
        #[derive(Debug)]
        pub enum Tools {
            $($ty($ty),)+
        }

        impl Tools {
            pub fn schema() -> Result<Vec<ToolSchema>> {
                Ok(vec![$($ty::as_tool_schema()?,)+])
            }

            pub fn names() -> &'static [&'static str] {
                const NAMES: &[&str] = &[$($ty::NAME,)+];
                NAMES
            }

            pub fn execute(self, state: &mut SnippetTools) -> Result<String> {
                match self {
                    $(Tools::$ty(tool) => tool.execute(state),)+
                }
            }
        }

        impl TryFrom<ToolCall> for Tools {
            type Error = anyhow::Error;

            fn try_from(ToolCall { name, arguments }: ToolCall) -> Result<Self> {
                // clients may omit arguments for tools that take none
                let arguments = match arguments {
                    Value::Null => Value::Object(Map::new()),
                    other => other,
                };
                log::trace!("{name}: {arguments}");

                $(
                    if name == $ty::NAME {
                        return serde_json::from_value(arguments)
                            .map(Tools::$ty)
                            .map_err(|e| anyhow!("invalid arguments for {name}: {e}"));
                    }
                )+

                Err(anyhow!("Unknown tool: {name}"))
            }
        }
    };
}

tools!(
    InsertMatrixAddition,
    InsertMatrixSubtraction,
    InsertMatrixMultiplication,
    InsertMatrixInverse,
    OpenDocument,
    SetCursor,
    CloseDocument,
    ListSnippets,
    PreviewSnippet,
    SetContext,
);
