//! Core library for discovering workspace packages and starting their dev servers.

pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod input;
pub mod launcher;
pub mod package;
pub mod package_manager;
pub mod selection;

pub use config::{Config, NameSource, PackageRoot, PrepareConfig, SelectionConfig};
pub use descriptor::PackageDescriptor;
pub use discovery::Discovery;
pub use error::{Error, Result};
#[cfg(unix)]
pub use input::PolledLineSource;
pub use input::{LineEvent, LineSource, StdinLineSource, ThreadedLineSource};
pub use launcher::{LaunchPlan, Launcher, PrepareOutcome, PrepareStep};
pub use package::Candidate;
pub use package_manager::{PackageManager, PackageManagerDetector, ResolvedPackageManager};
pub use selection::{Selection, SelectionReason, SelectionRequest, SelectionResolver, SelectionView};
