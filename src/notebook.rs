//! Typed model of a Jupyter notebook document, decoded from JSON.
//!
//! Only the fields this tool renders are modeled; unknown keys are ignored.
//! Missing or `null` fields decode to their empty defaults, so the renderer
//! never has to null-check.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Parsed notebook document: metadata plus an ordered list of cells.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notebook {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cells: Vec<Cell>,
}

/// Notebook-level metadata. Only the kernelspec is of interest, and it is
/// rendered verbatim, never interpreted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub kernelspec: Option<Value>,
}

/// One unit of a notebook: source text plus, for code cells, the outputs
/// captured when the cell was last executed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub cell_type: CellType,
    #[serde(default)]
    pub source: Option<SourceText>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Vec<Output>,
}

impl Cell {
    /// Cell source as a single string, fragments concatenated.
    pub fn source_text(&self) -> String {
        self.source
            .as_ref()
            .map(SourceText::concat)
            .unwrap_or_default()
    }
}

/// Cell kind. Anything other than markdown or code is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum CellType {
    Markdown,
    Code,
    Other(String),
}

impl From<String> for CellType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "markdown" => Self::Markdown,
            "code" => Self::Code,
            _ => Self::Other(s),
        }
    }
}

impl Default for CellType {
    fn default() -> Self {
        Self::Other("unknown".to_string())
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Code => write!(f, "code"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Source text as stored in a notebook: either one string or a list of
/// fragments that concatenate into the full text. Both shapes occur in the
/// wild.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Single(String),
    Fragments(Vec<String>),
}

impl SourceText {
    pub fn concat(&self) -> String {
        match self {
            Self::Single(text) => text.clone(),
            Self::Fragments(fragments) => fragments.concat(),
        }
    }

    /// True for an empty string or an empty fragment list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Fragments(fragments) => fragments.is_empty(),
        }
    }
}

impl Default for SourceText {
    fn default() -> Self {
        Self::Fragments(Vec::new())
    }
}

/// Captured result of executing a code cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub output_type: OutputType,
    #[serde(default)]
    pub text: Option<SourceText>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub traceback: Vec<String>,
}

impl Output {
    /// The `text/plain` entry of `data`, when present as a string or a list
    /// of string fragments. Rich entries (e.g. `image/png`) are ignored.
    pub fn text_plain(&self) -> Option<String> {
        match self.data.as_ref()?.get("text/plain")? {
            Value::String(text) => Some(text.clone()),
            Value::Array(fragments) => {
                Some(fragments.iter().filter_map(Value::as_str).collect())
            }
            _ => None,
        }
    }
}

/// Output kind. Unrecognized types are carried verbatim; only `error` gets
/// special treatment (traceback rendering).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OutputType {
    Stream,
    ExecuteResult,
    DisplayData,
    Error,
    Other(String),
}

impl From<String> for OutputType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "stream" => Self::Stream,
            "execute_result" => Self::ExecuteResult,
            "display_data" => Self::DisplayData,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl Default for OutputType {
    fn default() -> Self {
        Self::Other("output".to_string())
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream => write!(f, "stream"),
            Self::ExecuteResult => write!(f, "execute_result"),
            Self::DisplayData => write!(f, "display_data"),
            Self::Error => write!(f, "error"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Decode a possibly-`null` field to its default, so `null` and a missing
/// key behave the same.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a notebook from a file path.
pub fn parse_notebook<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let content = fs::read_to_string(path)?;
    parse_notebook_from_str(&content)
}

/// Parse a notebook from its JSON text.
pub fn parse_notebook_from_str(content: &str) -> Result<Notebook> {
    Ok(serde_json::from_str(content)?)
}
