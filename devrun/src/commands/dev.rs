//! Selecting a package and starting its dev server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use devrun_core::{
    input, Config, Discovery, Launcher, PackageManager, PackageManagerDetector, PrepareOutcome,
    SelectionRequest, SelectionResolver,
};
use tracing::debug;

use crate::formatting::{
    print_info, print_key_value, print_section_header, print_success, print_warning, SectionStyle,
    TerminalView,
};

/// Resolves the package to run, starts its task and returns the exit code to
/// leave with.
pub fn cmd_dev(
    config: &Config,
    package: Option<String>,
    interactive: bool,
    manager: Option<PackageManager>,
) -> Result<i32> {
    let resolver = SelectionResolver::new(&config.selection).with_task(&config.task);
    let discovery = Discovery::new(config);
    let mut line_source = input::stdin()?;
    let mut view = TerminalView::new(&config.task);

    let request = SelectionRequest {
        explicit: package.as_deref(),
        force_interactive: interactive,
    };
    let selection = resolver.resolve(
        request,
        || discovery.discover_names(),
        &mut line_source,
        &mut view,
    )?;
    debug!(package = %selection.name, reason = ?selection.reason, "package selected");

    println!();
    print_info(&format!(
        "Starting {} server for {}...",
        config.task, selection.name
    ));

    let launcher = Launcher::new(config);
    let candidate = launcher.locate(&selection.name)?;

    let detector = match manager {
        Some(kind) => PackageManagerDetector::new(vec![kind], kind),
        None => PackageManagerDetector::default(),
    };
    let plan = launcher.plan(&candidate, detector.detect());

    print_key_value("Directory", &plan.directory.display().to_string());
    print_key_value("Package manager", plan.manager.kind.as_str());
    if let Some(step) = &plan.prepare {
        print_key_value("Prepare", &step.task);
    }
    print_key_value("Command", &plan.display_command());
    println!();

    if let Some(step) = &plan.prepare {
        print_info(&format!("Running {}...", step.task));
        match plan.run_prepare() {
            Some(PrepareOutcome::Failed) => print_warning(&format!(
                "Failed to run {}. Continuing anyway...",
                step.task
            )),
            Some(PrepareOutcome::FallbackSucceeded) => {
                print_info(&format!("Ran {} directly", step.task))
            }
            Some(PrepareOutcome::Succeeded) | None => {}
        }
        println!();
    }

    // The child shares the terminal and receives Ctrl+C itself; we only
    // remember that it happened.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set signal handler: {}", e))?;

    let code = plan.spawn()?;

    println!();
    if interrupted.load(Ordering::SeqCst) {
        print_section_header(
            &format!("Stopping {} server for {}...", config.task, plan.package),
            SectionStyle::Warning,
        );
        return Ok(0);
    }

    let message = format!(
        "{} server for {} has exited with code {}",
        config.task, plan.package, code
    );
    if code == 0 {
        print_success(&message);
    } else {
        print_info(&message);
    }

    Ok(code)
}
