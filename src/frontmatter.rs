//! Front matter extraction.
//!
//! A content file may open with a fenced metadata block:
//!
//! ```text
//! ---                      +++
//! title: Hello             title = "Hello"
//! date: 2024-01-15         date = 2024-01-15
//! ---                      +++
//! Markdown body...         Markdown body...
//! ```
//!
//! `---` fences hold YAML, `+++` fences hold TOML. Both are normalized to a
//! JSON object so the collection schemas deserialize from a single shape no
//! matter which syntax the author picked. TOML datetimes become their string
//! form and go through the same date coercion as YAML strings.
//!
//! A file without a fence has empty front matter and the whole file is body.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("front matter opened with {0} but never closed")]
    Unterminated(&'static str),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn fence(self) -> &'static str {
        match self {
            Format::Yaml => "---",
            Format::Toml => "+++",
        }
    }
}

/// A content file split into its metadata and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub format: Option<Format>,
    pub data: Map<String, Value>,
    pub body: &'a str,
}

/// Parse a content file into front matter data and body.
pub fn parse(content: &str) -> Result<Document<'_>, FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some((format, raw, body)) = split_fenced(content)? else {
        return Ok(Document {
            format: None,
            data: Map::new(),
            body: content,
        });
    };

    let data = match format {
        Format::Yaml => parse_yaml(raw)?,
        Format::Toml => parse_toml(raw)?,
    };

    Ok(Document {
        format: Some(format),
        data,
        body,
    })
}

/// Locate the fenced block. Returns `(format, raw front matter, body)`.
fn split_fenced(content: &str) -> Result<Option<(Format, &str, &str)>, FrontmatterError> {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    let format = match first.trim_end() {
        "---" => Format::Yaml,
        "+++" => Format::Toml,
        _ => return Ok(None),
    };

    let fence = format.fence();
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            return Ok(Some((format, &rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated(fence))
}

fn parse_yaml(raw: &str) -> Result<Map<String, Value>, FrontmatterError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

fn parse_toml(raw: &str) -> Result<Map<String, Value>, FrontmatterError> {
    let table: toml::Table = toml::from_str(raw)?;
    Ok(table
        .into_iter()
        .map(|(k, v)| (k, toml_to_json(v)))
        .collect())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
