//! Package descriptor (`package.json`) reading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// The parts of a package descriptor the launcher cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDescriptor {
    #[serde(default)]
    scripts: Value,
}

impl PackageDescriptor {
    /// Path of the descriptor file inside a package directory.
    pub fn path_in(dir: &Path, file_name: &str) -> PathBuf {
        dir.join(file_name)
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Reads the descriptor of the package `package` located at `dir`.
    ///
    /// A missing file is reported as [`Error::PackageNotFound`], anything else
    /// that prevents reading it as [`Error::Descriptor`].
    pub fn read(package: &str, dir: &Path, file_name: &str) -> Result<Self> {
        let path = Self::path_in(dir, file_name);
        if !path.is_file() {
            return Err(Error::PackageNotFound {
                name: package.to_string(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| Error::Descriptor {
            package: package.to_string(),
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| Error::Descriptor {
            package: package.to_string(),
            file: file_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Whether `scripts.<task>` is set to a truthy value.
    pub fn has_task(&self, task: &str) -> bool {
        self.scripts.get(task).is_some_and(is_truthy)
    }

    /// Names of all truthy scripts, sorted.
    pub fn task_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .scripts
            .as_object()
            .map(|scripts| {
                scripts
                    .iter()
                    .filter(|(_, v)| is_truthy(v))
                    .map(|(k, _)| k.clone())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// JavaScript truthiness, which is what `package.json` consumers apply.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
