//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No packages with {task} scripts found!")]
    NoCandidates { task: String },

    #[error("Package {name} not found. Expected a descriptor at {}", path.display())]
    PackageNotFound { name: String, path: PathBuf },

    #[error("Error reading {file} for {package}: {message}")]
    Descriptor {
        package: String,
        file: String,
        message: String,
    },

    #[error(
        "Package {package} does not have a {task} script.{}",
        available_scripts(.available)
    )]
    MissingTask {
        package: String,
        task: String,
        available: Vec<String>,
    },

    #[error("Invalid selection: '{input}'. Expected a number between 1 and {count}.")]
    InvalidSelection { input: String, count: usize },

    #[error("Error starting {program}: {message}")]
    Launch { program: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

fn available_scripts(scripts: &[String]) -> String {
    if scripts.is_empty() {
        String::new()
    } else {
        format!(" Available scripts: {}.", scripts.join(", "))
    }
}
