use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::SnippetError;

const ADDITION: &str = include_str!("../templates/addition.cpp");
const SUBTRACTION: &str = include_str!("../templates/subtraction.cpp");
const MULTIPLICATION: &str = include_str!("../templates/multiplication.cpp");
const INVERSE: &str = include_str!("../templates/inverse.cpp");

/// The closed set of snippets this tool knows how to insert
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    Display,
    VariantNames,
    ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    #[serde(alias = "determinant")]
    #[strum(to_string = "inverse", serialize = "determinant")]
    #[value(alias = "determinant")]
    Inverse,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Inverse,
    ];

    /// Parse a textual operation name, rejecting anything outside the known set.
    pub fn from_name(name: &str) -> Result<Self, SnippetError> {
        name.trim()
            .parse()
            .map_err(|_| SnippetError::UnknownOperation(name.to_string()))
    }

    pub fn template(self) -> &'static str {
        match self {
            Operation::Addition => ADDITION,
            Operation::Subtraction => SUBTRACTION,
            Operation::Multiplication => MULTIPLICATION,
            Operation::Inverse => INVERSE,
        }
    }

    /// Name of the command that inserts this snippet
    pub const fn command_name(self) -> &'static str {
        match self {
            Operation::Addition => "insert_matrix_addition",
            Operation::Subtraction => "insert_matrix_subtraction",
            Operation::Multiplication => "insert_matrix_multiplication",
            Operation::Inverse => "insert_matrix_inverse",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Operation::Addition => "Matrix addition",
            Operation::Subtraction => "Matrix subtraction",
            Operation::Multiplication => "Matrix multiplication",
            Operation::Inverse => "Matrix inverse and determinant",
        }
    }

    /// C++ functions defined by the template, in the order they appear
    pub fn function_names(self) -> &'static [&'static str] {
        match self {
            Operation::Addition => &["addMatrices"],
            Operation::Subtraction => &["subtractMatrices"],
            Operation::Multiplication => &["multiplyMatrices"],
            Operation::Inverse => &[
                "getDeterminant",
                "getCofactorMatrix",
                "transposeMatrix",
                "getInverseMatrix",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_display() {
        for operation in Operation::ALL {
            assert_eq!(Operation::from_name(&operation.to_string()), Ok(operation));
        }
    }

    #[test]
    fn determinant_is_an_alias_for_inverse() {
        assert_eq!(Operation::from_name("determinant"), Ok(Operation::Inverse));
        assert_eq!(Operation::Inverse.to_string(), "inverse");
        let parsed: Operation = serde_json::from_str("\"determinant\"").unwrap();
        assert_eq!(parsed, Operation::Inverse);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            Operation::from_name("transpose"),
            Err(SnippetError::UnknownOperation("transpose".into()))
        );
        assert!(Operation::from_name("").is_err());
    }

    #[test]
    fn variant_names_cover_all_operations() {
        assert_eq!(Operation::VARIANTS.len(), Operation::ALL.len());
    }
}
