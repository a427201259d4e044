//! Launcher configuration.
//!
//! Every value here has a default matching the workspace this tool was written
//! for; the CLI overrides them from flags.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TASK: &str = "dev";
pub const DEFAULT_DESCRIPTOR: &str = "package.json";
pub const DEFAULT_PACKAGE: &str = "inference";
pub const DEFAULT_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PREPARE_TASK: &str = "export-templates";
pub const DEFAULT_PREPARE_RUNNER: &str = "tsx";

const DEFAULT_PACKAGES: &[&str] = &[
    "agents",
    "blob",
    "dduf",
    "doc-internal",
    "gguf",
    "hub",
    "inference",
    "jinja",
    "languages",
    "ollama-utils",
    "space-header",
    "tasks",
    "tasks-gen",
];

const DEFAULT_E2E_PACKAGES: &[&str] = &["svelte", "ts", "deno", "yarn"];

/// Where the names inside a package root come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    /// A fixed list, checked in order.
    Fixed(Vec<String>),
    /// Every sub-directory of the root, sorted by name.
    Scan,
}

/// A directory holding packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRoot {
    /// Directory relative to the workspace root.
    pub dir: PathBuf,
    /// Reserved name prefix for packages of this root, e.g. `e2e/`.
    pub prefix: Option<String>,
    pub names: NameSource,
}

impl PackageRoot {
    pub fn fixed(dir: impl Into<PathBuf>, names: &[&str]) -> Self {
        Self {
            dir: dir.into(),
            prefix: None,
            names: NameSource::Fixed(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Name under which a package directory of this root is offered.
    pub fn qualified_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

/// Workspace layout and task settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_root: PathBuf,
    pub roots: Vec<PackageRoot>,
    pub task: String,
    pub descriptor_file: String,
    pub selection: SelectionConfig,
    /// Step run before the task, when the package supports it.
    pub prepare: Option<PrepareConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            roots: vec![
                PackageRoot::fixed("packages", DEFAULT_PACKAGES),
                PackageRoot::fixed("e2e", DEFAULT_E2E_PACKAGES).with_prefix("e2e/"),
            ],
            task: DEFAULT_TASK.to_string(),
            descriptor_file: DEFAULT_DESCRIPTOR.to_string(),
            selection: SelectionConfig::default(),
            prepare: Some(PrepareConfig::default()),
        }
    }
}

impl Config {
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }

    /// Switches every root to directory enumeration.
    pub fn scan_all_roots(mut self) -> Self {
        for root in &mut self.roots {
            root.names = NameSource::Scan;
        }
        self
    }

    /// Absolute-or-relative path of a root as seen from the current directory.
    pub fn root_path(&self, root: &PackageRoot) -> PathBuf {
        self.workspace_root.join(&root.dir)
    }
}

/// Settings for the interactive selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    pub default_package: Option<String>,
    pub timeout: Duration,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_package: Some(DEFAULT_PACKAGE.to_string()),
            timeout: DEFAULT_SELECTION_TIMEOUT,
        }
    }
}

/// A one-off script run in the package directory before the task.
///
/// The script runs through the package manager when the descriptor declares
/// it. When it is not declared or fails, `<fallback_script>` is run with the
/// package's locally installed `<runner>` instead, if both exist. A failed
/// step never stops the task from starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareConfig {
    pub task: String,
    /// Script path relative to the package directory.
    pub fallback_script: PathBuf,
    /// Executable looked up in `node_modules/.bin`.
    pub runner: String,
}

impl PrepareConfig {
    /// Runs `task`, falling back to `scripts/<task>.ts` through `tsx`.
    pub fn new(task: impl Into<String>) -> Self {
        let task = task.into();
        Self {
            fallback_script: PathBuf::from("scripts").join(format!("{}.ts", task)),
            runner: DEFAULT_PREPARE_RUNNER.to_string(),
            task,
        }
    }
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREPARE_TASK)
    }
}
