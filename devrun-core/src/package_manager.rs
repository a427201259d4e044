//! Package manager detection.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

/// Package managers able to run a `package.json` script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Pnpm,
    Npm,
    Yarn,
}

impl PackageManager {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments that run the script `task`.
    pub fn run_args(&self, task: &str) -> Vec<String> {
        vec!["run".to_string(), task.to_string()]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package manager together with the program used to start it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackageManager {
    pub kind: PackageManager,
    /// Full path when found on the search path, the bare name otherwise.
    pub program: OsString,
}

impl ResolvedPackageManager {
    /// Uses `kind` by name, leaving the lookup to process spawning.
    pub fn by_name(kind: PackageManager) -> Self {
        Self {
            kind,
            program: OsString::from(kind.as_str()),
        }
    }
}

/// Picks the first available package manager from a preference list.
#[derive(Debug, Clone)]
pub struct PackageManagerDetector {
    preference: Vec<PackageManager>,
    fallback: PackageManager,
}

impl Default for PackageManagerDetector {
    fn default() -> Self {
        Self {
            preference: vec![PackageManager::Pnpm, PackageManager::Npm],
            fallback: PackageManager::Npm,
        }
    }
}

impl PackageManagerDetector {
    pub fn new(preference: Vec<PackageManager>, fallback: PackageManager) -> Self {
        Self {
            preference,
            fallback,
        }
    }

    /// Detects against the `PATH` of the current process.
    pub fn detect(&self) -> ResolvedPackageManager {
        self.detect_with(|name| which::which(name).ok())
    }

    /// Detects against an explicit search path, resolving relative entries from `cwd`.
    pub fn detect_in(
        &self,
        paths: impl AsRef<OsStr>,
        cwd: impl AsRef<Path>,
    ) -> ResolvedPackageManager {
        let paths = paths.as_ref();
        let cwd = cwd.as_ref();
        self.detect_with(|name| which::which_in(name, Some(paths), cwd).ok())
    }

    fn detect_with<F>(&self, mut lookup: F) -> ResolvedPackageManager
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        for kind in &self.preference {
            if let Some(path) = lookup(kind.as_str()) {
                debug!(manager = %kind, path = %path.display(), "found package manager");
                return ResolvedPackageManager {
                    kind: *kind,
                    program: path.into_os_string(),
                };
            }
            debug!(manager = %kind, "package manager not on search path");
        }

        debug!(manager = %self.fallback, "falling back to default package manager");
        ResolvedPackageManager::by_name(self.fallback)
    }
}
