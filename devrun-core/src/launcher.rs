//! Starting the selected package's task.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::{Config, PrepareConfig};
use crate::descriptor::PackageDescriptor;
use crate::error::{Error, Result};
use crate::package::{package_dir, Candidate};
use crate::package_manager::ResolvedPackageManager;

/// Validates package names and turns them into launch plans.
pub struct Launcher<'a> {
    config: &'a Config,
}

impl<'a> Launcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Finds the package called `name` and checks that it offers the task.
    ///
    /// # Errors
    ///
    /// [`Error::PackageNotFound`] when there is no descriptor for `name`,
    /// [`Error::Descriptor`] when it cannot be read and
    /// [`Error::MissingTask`] when it lacks the configured task.
    pub fn locate(&self, name: &str) -> Result<Candidate> {
        let dir = package_dir(self.config, name).ok_or_else(|| Error::PackageNotFound {
            name: name.to_string(),
            path: self.config.workspace_root.join(name),
        })?;

        let descriptor = PackageDescriptor::read(name, &dir, &self.config.descriptor_file)?;
        if !descriptor.has_task(&self.config.task) {
            return Err(Error::MissingTask {
                package: name.to_string(),
                task: self.config.task.clone(),
                available: descriptor.task_names(),
            });
        }

        debug!(package = name, dir = %dir.display(), "located package");
        Ok(Candidate::new(name, dir).with_scripts(descriptor.task_names()))
    }

    pub fn plan(&self, candidate: &Candidate, manager: ResolvedPackageManager) -> LaunchPlan {
        let prepare = self
            .config
            .prepare
            .as_ref()
            .and_then(|prepare| PrepareStep::for_candidate(prepare, candidate, &manager));

        LaunchPlan {
            package: candidate.name.clone(),
            directory: candidate.path.clone(),
            args: manager.kind.run_args(&self.config.task),
            manager,
            prepare,
        }
    }
}

/// A script to run before the task, through the package manager or a
/// locally installed runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareStep {
    pub task: String,
    /// Package manager arguments, when the descriptor declares the script.
    pub args: Option<Vec<String>>,
    /// Runner and arguments used when the package manager is not an option
    /// or fails.
    pub fallback: Option<(PathBuf, Vec<String>)>,
}

impl PrepareStep {
    fn for_candidate(
        config: &PrepareConfig,
        candidate: &Candidate,
        manager: &ResolvedPackageManager,
    ) -> Option<Self> {
        let args = candidate
            .has_script(&config.task)
            .then(|| manager.kind.run_args(&config.task));

        let bin = candidate.path.join("node_modules").join(".bin");
        let runner = [config.runner.clone(), format!("{}.cmd", config.runner)]
            .into_iter()
            .map(|name| bin.join(name))
            .find(|path| path.is_file());
        let fallback = runner
            .filter(|_| candidate.path.join(&config.fallback_script).is_file())
            .map(|runner| {
                let script = config.fallback_script.to_string_lossy().to_string();
                (runner, vec![script])
            });

        if args.is_none() && fallback.is_none() {
            return None;
        }
        Some(Self {
            task: config.task.clone(),
            args,
            fallback,
        })
    }
}

/// How a [`PrepareStep`] went. Failure never prevents the task from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareOutcome {
    Succeeded,
    FallbackSucceeded,
    Failed,
}

/// Everything needed to start a task, ready to be shown before it runs.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub package: String,
    pub directory: PathBuf,
    pub manager: ResolvedPackageManager,
    pub args: Vec<String>,
    pub prepare: Option<PrepareStep>,
}

impl LaunchPlan {
    /// The command as a user would type it.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.manager.kind.as_str().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Runs the prepare step, if any, to completion with the terminal attached.
    pub fn run_prepare(&self) -> Option<PrepareOutcome> {
        let step = self.prepare.as_ref()?;

        if let Some(args) = &step.args {
            info!(package = %self.package, task = %step.task, "running prepare script");
            match self.run_to_completion(&self.manager.program, args) {
                Ok(true) => return Some(PrepareOutcome::Succeeded),
                Ok(false) => warn!(task = %step.task, "prepare script failed"),
                Err(e) => warn!(task = %step.task, error = %e, "could not start prepare script"),
            }
        }

        if let Some((runner, args)) = &step.fallback {
            info!(
                runner = %runner.display(),
                task = %step.task,
                "running prepare script directly"
            );
            match self.run_to_completion(runner, args) {
                Ok(true) => return Some(PrepareOutcome::FallbackSucceeded),
                Ok(false) => warn!(task = %step.task, "direct prepare script failed"),
                Err(e) => warn!(runner = %runner.display(), error = %e, "could not start runner"),
            }
        }

        Some(PrepareOutcome::Failed)
    }

    fn run_to_completion(&self, program: impl AsRef<OsStr>, args: &[String]) -> io::Result<bool> {
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.directory)
            .status()?;
        Ok(status.success())
    }

    /// Runs the command in the package directory with the terminal attached.
    ///
    /// Returns the child's exit code, or 0 when it has none because it was
    /// stopped by a signal.
    pub fn spawn(&self) -> Result<i32> {
        info!(package = %self.package, command = %self.display_command(), "starting");

        let status = Command::new(&self.manager.program)
            .args(&self.args)
            .current_dir(&self.directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Launch {
                program: self.manager.program.to_string_lossy().to_string(),
                message: e.to_string(),
            })?;

        debug!(package = %self.package, ?status, "child exited");
        Ok(status.code().unwrap_or(0))
    }
}
