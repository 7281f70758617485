use crate::state::SnippetTools;
use crate::types::{Example, InputSchema, ToolSchema};
use anyhow::{anyhow, Result};
use schemars::{
    generate::SchemaSettings,
    transform::{RecursiveTransform, Transform},
    JsonSchema, Schema,
};
use serde::Serialize;
use serde_json::Value;

/// A command exposed to MCP clients
pub trait Tool {
    /// Name clients call the tool by; matches the schema title
    const NAME: &'static str;

    fn execute(self, state: &mut SnippetTools) -> Result<String>;
}

pub trait WithExamples: Sized + Serialize {
    fn examples() -> Option<Vec<Example<Self>>> {
        None
    }
}

// Option<T> fields render as `"type": ["integer", "null"]`; clients expect a single type
fn remove_null(schema: &mut Schema) {
    if let Some(Value::Array(types)) = schema.get_mut("type") {
        types.retain(|v| matches!(v, Value::String(s) if s != "null"));
    }

    if let Some(Value::Array(types)) = schema.get("type") {
        if let [only] = types.as_slice() {
            let only = only.clone();
            schema.insert("type".into(), only);
        }
    }

    if let Some(Value::Array(variants)) = schema.get_mut("enum") {
        variants.retain(|v| !v.is_null());
    }
}

pub trait AsToolSchema {
    fn as_tool_schema() -> Result<ToolSchema>;
}

impl<T> AsToolSchema for T
where
    T: JsonSchema + WithExamples,
{
    fn as_tool_schema() -> Result<ToolSchema> {
        let settings = SchemaSettings::draft2020_12().with(|s| {
            s.meta_schema = None;
            s.inline_subschemas = true;
        });

        let generator = settings.into_generator();
        let mut schema = generator.into_root_schema_for::<Self>();

        RecursiveTransform(remove_null).transform(&mut schema);

        let name = take_string(&mut schema, "title")?;
        let description = take_string(&mut schema, "description")?;
        schema.remove("$schema");

        if let Some(examples) = Self::examples() {
            schema.insert("examples".to_string(), serde_json::to_value(examples)?);
        }

        let input_schema: InputSchema =
            serde_json::from_value(schema.clone().into()).map_err(|e| {
                log::error!("{}", Value::from(schema));
                anyhow!("invalid input schema for {name}: {e}")
            })?;

        Ok(ToolSchema {
            name,
            description: Some(description),
            input_schema,
        })
    }
}

fn take_string(schema: &mut Schema, key: &str) -> Result<String> {
    match schema.remove(key) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(anyhow!("tool schema is missing `{key}`")),
    }
}
