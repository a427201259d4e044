//! Candidate packages and name-to-directory mapping.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{Config, PackageRoot};

/// A package offering the configured task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub name: String,
    pub path: PathBuf,
    /// Every script the descriptor declares, sorted.
    pub scripts: Vec<String>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            scripts: Vec::new(),
        }
    }

    pub fn with_scripts(mut self, scripts: Vec<String>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn has_script(&self, script: &str) -> bool {
        self.scripts.iter().any(|s| s == script)
    }
}

/// Finds the root a package name belongs to and the directory name inside it.
///
/// Names starting with a root's reserved prefix belong to that root; every
/// other name belongs to the first root without a prefix.
pub fn root_for<'a, 'n>(config: &'a Config, name: &'n str) -> Option<(&'a PackageRoot, &'n str)> {
    let prefixed = config.roots.iter().find_map(|root| {
        let prefix = root.prefix.as_deref()?;
        name.strip_prefix(prefix).map(|rest| (root, rest))
    });

    prefixed.or_else(|| {
        config
            .roots
            .iter()
            .find(|root| root.prefix.is_none())
            .map(|root| (root, name))
    })
}

/// Directory of the package called `name`, whether or not it exists.
pub fn package_dir(config: &Config, name: &str) -> Option<PathBuf> {
    root_for(config, name).map(|(root, dir_name)| config.root_path(root).join(dir_name))
}
