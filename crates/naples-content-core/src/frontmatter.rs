//! Front matter splitting and parsing.
//!
//! A content resource is a metadata block followed by an opaque body:
//!
//! ```text
//! ---                      +++
//! title: "..."             title = "..."
//! tags: [beach, family]    tags = ["beach", "family"]
//! ---                      +++
//! Body markup…             Body markup…
//! ```
//!
//! `---` fences hold YAML and `+++` fences hold TOML. Either way the block
//! is converted into an untyped [`RawRecord`] for the schema registry. A
//! resource without an opening fence has an empty record and the whole text
//! as its body; the registry then reports every missing required field.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::schema::RawRecord;

const YAML_FENCE: &str = "---";
const TOML_FENCE: &str = "+++";

/// A resource split into its metadata record and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResource {
    pub record: RawRecord,
    pub body: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum FrontMatterError {
    #[error("front matter opened with '{0}' is never closed")]
    Unterminated(&'static str),
    #[error("invalid YAML front matter: {0}")]
    Yaml(String),
    #[error("invalid TOML front matter: {0}")]
    Toml(String),
    #[error("front matter must be a key/value mapping")]
    NotAMapping,
}

/// Split `raw` into front matter and body and parse the front matter.
pub fn parse_resource(raw: &str) -> Result<ParsedResource, FrontMatterError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = text.split_inclusive('\n');
    let fence = match lines.next().map(|l| l.trim_end()) {
        Some(YAML_FENCE) => YAML_FENCE,
        Some(TOML_FENCE) => TOML_FENCE,
        _ => {
            return Ok(ParsedResource {
                record: RawRecord::new(),
                body: text.to_string(),
            })
        }
    };

    let mut offset = text.split_inclusive('\n').next().map_or(0, str::len);
    let block_start = offset;
    let mut block_end = None;
    for line in lines {
        if line.trim_end() == fence {
            block_end = Some(offset);
            offset += line.len();
            break;
        }
        offset += line.len();
    }
    let block_end = block_end.ok_or(FrontMatterError::Unterminated(fence))?;

    let block = &text[block_start..block_end];
    let body = text[offset..].to_string();
    let record = if fence == YAML_FENCE {
        parse_yaml_block(block)?
    } else {
        parse_toml_block(block)?
    };

    Ok(ParsedResource { record, body })
}

fn parse_yaml_block(block: &str) -> Result<RawRecord, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(RawRecord::new());
    }
    let value: Value =
        serde_yaml::from_str(block).map_err(|e| FrontMatterError::Yaml(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(RawRecord::new()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

fn parse_toml_block(block: &str) -> Result<RawRecord, FrontMatterError> {
    let table: toml::Table =
        toml::from_str(block).map_err(|e| FrontMatterError::Toml(e.to_string()))?;
    Ok(table
        .into_iter()
        .map(|(k, v)| (k, toml_to_json(v)))
        .collect())
}

/// TOML datetimes become their string form so timestamp fields read the
/// same as quoted YAML dates.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}
