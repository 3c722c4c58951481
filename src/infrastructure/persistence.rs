use crate::domain::{DomainError, DomainResult, FormSchema};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub struct SchemaRepository;

impl SchemaRepository {
    pub fn save_schema(schema: &FormSchema, path: &Path) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(schema)
            .map_err(|e| DomainError::Io(format!("Serialization failed: {}", e)))?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), labels = schema.len(), "saved schema");
        Ok(())
    }

    pub fn load_schema(path: &Path) -> DomainResult<FormSchema> {
        let content = fs::read_to_string(path)
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        let schema = Self::parse_schema(&content)?;
        tracing::info!(path = %path.display(), labels = schema.len(), "loaded schema");
        Ok(schema)
    }

    /// Accepts only a JSON array whose elements are all strings.
    pub fn parse_schema(content: &str) -> DomainResult<FormSchema> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| DomainError::InvalidSchema(format!("not valid JSON - {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(DomainError::InvalidSchema(format!(
                    "expected an array of strings, found {}",
                    json_type(&other)
                )));
            }
        };

        let mut labels = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::String(label) => labels.push(label),
                other => {
                    return Err(DomainError::InvalidSchema(format!(
                        "element {} is {}, expected a string",
                        index,
                        json_type(&other)
                    )));
                }
            }
        }
        Ok(FormSchema::new(labels))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
