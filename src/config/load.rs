//! Loading an [`AssessSpec`] from YAML.

use std::fs;
use std::path::Path;

use super::schema::AssessSpec;
use crate::error::{AssessError, Result};

/// Read and parse a YAML assessment file.
///
/// The result is not validated: command-line overrides are applied first.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AssessSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path)
        .map_err(|e| AssessError::io(format!("reading config file {}", path.display()), e))?;
    parse_config(&yaml, path)
}

pub(crate) fn parse_config(yaml: &str, path: &Path) -> Result<AssessSpec> {
    if yaml.trim().is_empty() {
        return Ok(AssessSpec::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| AssessError::ConfigParsing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
