use std::borrow::Cow;

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::snippets::Operation;
use crate::state::SnippetTools;
use crate::traits::{Tool, WithExamples};

macro_rules! insertion_command {
    ($ty:ident, $operation:expr, $description:literal) => {
        #[doc = $description]
        #[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct $ty {}

        impl $ty {
            pub const OPERATION: Operation = $operation;
        }

        impl JsonSchema for $ty {
            fn schema_name() -> Cow<'static, str> {
                Cow::Borrowed(Self::OPERATION.command_name())
            }

            fn json_schema(_gen: &mut schemars::SchemaGenerator) -> schemars::Schema {
                schemars::json_schema!({
                    "title": Self::OPERATION.command_name(),
                    "description": $description,
                    "type": "object",
                    "properties": {}
                })
            }
        }

        impl WithExamples for $ty {}

        impl Tool for $ty {
            const NAME: &'static str = $operation.command_name();

            fn execute(self, state: &mut SnippetTools) -> Result<String> {
                state.insert_snippet(Self::OPERATION)
            }
        }
    };
}

insertion_command!(
    InsertMatrixAddition,
    Operation::Addition,
    "Insert a C++ function adding two matrices at the cursor of the open document"
);

insertion_command!(
    InsertMatrixSubtraction,
    Operation::Subtraction,
    "Insert a C++ function subtracting two matrices at the cursor of the open document"
);

insertion_command!(
    InsertMatrixMultiplication,
    Operation::Multiplication,
    "Insert a C++ function multiplying two matrices at the cursor of the open document"
);

insertion_command!(
    InsertMatrixInverse,
    Operation::Inverse,
    "Insert C++ functions computing a matrix determinant and inverse at the cursor of the open document"
);
