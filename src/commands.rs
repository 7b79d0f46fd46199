//! Cleanup command: load, select, prune, report, save

use log::{debug, info};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::Result;
use crate::kubeconfig::{resolve_kubeconfig_paths, KubeconfigSet};
use crate::prune::{PruneOptions, PrunePlan};
use crate::ui::{
    render_plan, summarize, ContextSelector, InteractiveSelector, NamedSelector, Selection,
};

/// What a cleanup run ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Kubeconfig has no contexts to choose from
    NoContexts,
    /// User cancelled the selection
    Aborted,
    /// Selection produced no removals
    NothingToRemove,
    /// Plan was printed but not written
    DryRun(PrunePlan),
    /// Plan was applied and written
    Applied(PrunePlan),
}

/// Run the cleanup with the selector implied by the CLI arguments
pub fn run_cleanup_command(cli: &Cli) -> Result<CleanupOutcome> {
    let paths = resolve_kubeconfig_paths(cli.kubeconfig.as_deref())?;

    if cli.contexts.is_empty() {
        run_cleanup(&paths, &InteractiveSelector, cli.prune_options(), cli.dry_run)
    } else {
        let selector = NamedSelector::new(cli.contexts.clone());
        run_cleanup(&paths, &selector, cli.prune_options(), cli.dry_run)
    }
}

/// Single load-mutate-store pass over the kubeconfig files.
///
/// Selection and planning see the merged document; removals are written back to
/// each file that holds the removed entries.
pub fn run_cleanup(
    paths: &[PathBuf],
    selector: &dyn ContextSelector,
    options: PruneOptions,
    dry_run: bool,
) -> Result<CleanupOutcome> {
    let mut files = KubeconfigSet::load(paths)?;
    let config = files.merged();
    info!("Loaded kubeconfig {}", files.display_paths());

    if config.contexts.is_empty() {
        println!("No contexts found in {}", files.display_paths());
        return Ok(CleanupOutcome::NoContexts);
    }

    let selected = match selector.select(&config.contexts)? {
        Selection::Chosen(names) => names,
        Selection::Aborted => {
            info!("Selection aborted, kubeconfig left unchanged");
            return Ok(CleanupOutcome::Aborted);
        }
    };
    debug!("Options: {:?}, selected: {:?}", options, selected);

    let plan = PrunePlan::build(&config, &selected, options);
    if plan.is_empty() {
        println!("Nothing to remove.");
        return Ok(CleanupOutcome::NothingToRemove);
    }

    println!("{}", render_plan(&plan));

    if dry_run {
        println!(
            "Dry run: no changes written to {}",
            files.display_paths()
        );
        return Ok(CleanupOutcome::DryRun(plan));
    }

    let written = files.apply_and_save(&plan)?;
    let written: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
    println!(
        "✓ Removed {} from {}",
        summarize(&plan),
        written.join(", ")
    );
    info!("Cleanup complete");

    Ok(CleanupOutcome::Applied(plan))
}
