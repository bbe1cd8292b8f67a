//! Markdown documents with a YAML front-matter block.

mod datetime;
mod tags;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

pub use datetime::{parse_datetime, Layout, DATETIME_LAYOUTS};
pub use tags::normalize_tags;

const DELIMITER: &str = "---";

/// Canonical field name -> key used in the user's documents
pub type FieldMapping = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("could not read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid front matter: {0}")]
    BadYaml(#[from] serde_yaml::Error),
    #[error("unrecognized datetime: {0:?}")]
    BadDatetime(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub slug: String,
    pub cover_image_url: String,
    pub title: String,
    pub summary: String,
    pub theme: String,
    pub tags: String,
    pub datetime: Option<DateTime<FixedOffset>>,
}

impl FrontMatter {
    /// Decode the text found between the delimiters.
    pub fn from_yaml(text: &str, mapping: &FieldMapping) -> Result<Self, ParseError> {
        let mut fields = decode_mapping(text)?;
        remap_keys(&mut fields, mapping);
        Self::from_mapping(fields)
    }

    /// Normalize `datetime` and `tags` in a decoded mapping and read the known fields.
    pub fn from_mapping(mut fields: Mapping) -> Result<Self, ParseError> {
        if let Some(Value::String(raw)) = fields.get("datetime") {
            let parsed = parse_datetime(raw)?;
            fields.insert(
                Value::String("datetime".to_string()),
                Value::String(parsed.to_rfc3339()),
            );
        }

        if let Some(raw) = fields.get("tags") {
            let joined = normalize_tags(raw);
            fields.insert(Value::String("tags".to_string()), Value::String(joined));
        }

        Ok(serde_yaml::from_value(Value::Mapping(fields))?)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    /// Body lines, each terminated by `\n`
    pub content: String,
}

enum Section {
    Body,
    Inside(Vec<String>),
}

pub fn parse_file(path: &Path, mapping: &FieldMapping) -> Result<Document, ParseError> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file), mapping)
}

pub fn parse_str(text: &str, mapping: &FieldMapping) -> Result<Document, ParseError> {
    parse_reader(text.as_bytes(), mapping)
}

/// Split a document into its front matter and body.
///
/// Every `---` line toggles between body and front matter, and delimiter
/// lines never reach the body. Each closed block is decoded and its keys
/// override those of earlier blocks. A block still open at the end of input
/// is not front matter and its lines become body.
pub fn parse_reader<R: BufRead>(reader: R, mapping: &FieldMapping) -> Result<Document, ParseError> {
    let mut fields = Mapping::new();
    let mut content = String::new();
    let mut section = Section::Body;

    for line in reader.lines() {
        let line = line?;
        let is_delimiter = line.trim() == DELIMITER;

        section = match (section, is_delimiter) {
            (Section::Body, true) => Section::Inside(Vec::new()),
            (Section::Body, false) => {
                push_line(&mut content, &line);
                Section::Body
            }
            (Section::Inside(lines), true) => {
                let mut block = decode_mapping(&lines.join("\n"))?;
                remap_keys(&mut block, mapping);
                fields.extend(block);
                Section::Body
            }
            (Section::Inside(mut lines), false) => {
                lines.push(line);
                Section::Inside(lines)
            }
        };
    }

    if let Section::Inside(lines) = section {
        tracing::warn!(
            lines = lines.len(),
            "front matter block is not terminated, treating it as body"
        );
        for line in &lines {
            push_line(&mut content, line);
        }
    }

    Ok(Document {
        front_matter: FrontMatter::from_mapping(fields)?,
        content,
    })
}

fn push_line(content: &mut String, line: &str) {
    content.push_str(line);
    content.push('\n');
}

fn decode_mapping(text: &str) -> Result<Mapping, ParseError> {
    if text.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(text)? {
        Value::Mapping(fields) => Ok(fields),
        Value::Null => Ok(Mapping::new()),
        _ => Err(serde_yaml::Error::custom("front matter must be a mapping").into()),
    }
}

fn remap_keys(fields: &mut Mapping, mapping: &FieldMapping) {
    for (canonical, source) in mapping {
        if let Some(value) = fields.remove(source.as_str()) {
            fields.insert(Value::String(canonical.clone()), value);
        }
    }
}
