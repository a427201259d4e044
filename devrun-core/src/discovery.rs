//! Discovery of packages that offer the configured task.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{Config, NameSource, PackageRoot};
use crate::descriptor::PackageDescriptor;
use crate::package::Candidate;

/// Finds candidate packages across the configured roots.
///
/// Discovery is best-effort: a package whose descriptor is missing or cannot
/// be parsed is skipped without an error.
pub struct Discovery<'a> {
    config: &'a Config,
}

impl<'a> Discovery<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Candidates in root order, then name order within each root.
    pub fn discover(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for root in &self.config.roots {
            let root_path = self.config.root_path(root);
            for dir_name in Self::names_in(root, &root_path) {
                let dir = root_path.join(&dir_name);
                if let Some(descriptor) = self.task_descriptor(&dir) {
                    candidates.push(
                        Candidate::new(root.qualified_name(&dir_name), dir)
                            .with_scripts(descriptor.task_names()),
                    );
                }
            }
        }
        debug!(count = candidates.len(), task = %self.config.task, "discovered packages");
        candidates
    }

    pub fn discover_names(&self) -> Vec<String> {
        self.discover().into_iter().map(|c| c.name).collect()
    }

    fn names_in(root: &PackageRoot, root_path: &Path) -> Vec<String> {
        match &root.names {
            NameSource::Fixed(names) => names.clone(),
            NameSource::Scan => {
                let mut names: Vec<String> = WalkDir::new(root_path)
                    .min_depth(1)
                    .max_depth(1)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_dir())
                    .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
                    .collect();
                names.sort();
                names
            }
        }
    }

    /// The descriptor in `dir`, if it declares the configured task.
    fn task_descriptor(&self, dir: &Path) -> Option<PackageDescriptor> {
        let path = PackageDescriptor::path_in(dir, &self.config.descriptor_file);
        if !path.is_file() {
            return None;
        }

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| PackageDescriptor::parse(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(descriptor) => descriptor.has_task(&self.config.task).then_some(descriptor),
            Err(message) => {
                debug!(path = %path.display(), %message, "skipping unreadable descriptor");
                None
            }
        }
    }
}
