//! YAML schema for a declarative assessment run.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::eval::report::STDOUT_SENTINEL;

/// Deserialize a bool from either a YAML boolean (`true`) or a quoted string (`"true"`).
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 'true' or 'false', got '{other}'"
            ))),
        },
    }
}

fn default_known() -> String {
    "known".to_string()
}

fn default_metrics() -> PathBuf {
    PathBuf::from(STDOUT_SENTINEL)
}

/// Complete assessment specification
///
/// Every field is optional in YAML; command-line values override it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessSpec {
    /// Files or directories holding known and method classifications
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// Tag of the classifier under assessment (`<sample>.<method>.tsv`)
    #[serde(default)]
    pub method: String,

    /// Tag of the truth files (`<sample>.<known>.tsv`)
    #[serde(default = "default_known")]
    pub known: String,

    /// Restrict species universe and tally rows to one marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// File name prefixes to skip
    #[serde(default)]
    pub ignore_prefixes: Vec<String>,

    /// Minimum sequence count for a species to count as predicted
    #[serde(default)]
    pub min_abundance: usize,

    /// SQLite reference database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Output destinations
    #[serde(default)]
    pub output: OutputSpec,

    /// Pair legacy files sequence by sequence instead of per sample
    #[serde(default, deserialize_with = "deserialize_bool_lenient")]
    pub per_sequence: bool,
}

impl Default for AssessSpec {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            method: String::new(),
            known: default_known(),
            marker: None,
            ignore_prefixes: Vec::new(),
            min_abundance: 0,
            database: None,
            output: OutputSpec::default(),
            per_sequence: false,
        }
    }
}

impl AssessSpec {
    /// File name suffix of the method's classifications.
    pub fn method_suffix(&self) -> String {
        format!(".{}.tsv", self.method)
    }

    /// File name suffix of the truth files.
    pub fn known_suffix(&self) -> String {
        format!(".{}.tsv", self.known)
    }
}

/// Where the three reports go; `-` is standard output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Metrics table
    #[serde(default = "default_metrics")]
    pub metrics: PathBuf,

    /// Mapping table of expected vs predicted combinations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,

    /// Multi-class confusion matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confusion: Option<PathBuf>,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self { metrics: default_metrics(), table: None, confusion: None }
    }
}
