mod commands;
mod formatting;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use devrun_core::config::{DEFAULT_PACKAGE, DEFAULT_PREPARE_TASK, DEFAULT_TASK};
use devrun_core::{Config, PackageManager, PrepareConfig};
use tracing::Level;

#[derive(Parser)]
#[command(name = "devrun")]
#[command(about = "Pick a workspace package and start its dev server")]
struct Cli {
    /// Package to start, e.g. `inference` or `e2e/svelte`. Only the first is used.
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    /// Show the selection menu even when a package is given.
    #[arg(short, long, action)]
    interactive: bool,

    #[arg(long, env = "DEVRUN_ROOT", default_value = ".")]
    root: PathBuf,

    #[arg(long, default_value = DEFAULT_TASK)]
    task: String,

    /// Package started when no selection is made in time.
    #[arg(long = "default", default_value = DEFAULT_PACKAGE)]
    default_package: String,

    #[arg(long, action)]
    no_default: bool,

    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    #[arg(long, value_enum)]
    package_manager: Option<PackageManagerArg>,

    /// Script run before the task when the package declares it or ships
    /// `scripts/<NAME>.ts` with a local `tsx`.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PREPARE_TASK)]
    prepare: String,

    #[arg(long, action)]
    no_prepare: bool,

    /// Offer every package directory instead of the built-in package lists.
    #[arg(long, action)]
    scan: bool,

    /// Print the packages offering the task and exit.
    #[arg(long, action)]
    list: bool,

    #[arg(long, action, requires = "list")]
    json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum PackageManagerArg {
    Pnpm,
    Npm,
    Yarn,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
        }
    }
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::default().with_workspace_root(&self.root);
        if self.scan {
            config = config.scan_all_roots();
        }
        config.task = self.task.clone();
        config.selection.default_package = if self.no_default {
            None
        } else {
            Some(self.default_package.clone())
        };
        config.selection.timeout = Duration::from_millis(self.timeout_ms);
        config.prepare = (!self.no_prepare).then(|| PrepareConfig::new(&self.prepare));
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();

    if cli.list {
        return commands::cmd_list(&config, cli.json);
    }

    let package = cli.packages.first().cloned();
    let code = commands::cmd_dev(
        &config,
        package,
        cli.interactive,
        cli.package_manager.map(Into::into),
    )?;

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
