//! CLI argument parsing

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::defaults;
use crate::prune::PruneOptions;

/// Remove kubeconfig contexts and the clusters and users they leave behind
#[derive(Parser, Debug)]
#[command(name = "kubectl-config_cleanup")]
#[command(version)]
#[command(
    about = "Remove kubeconfig contexts and prune the clusters and users they reference",
    long_about = "Remove kubeconfig contexts and prune the clusters and users they reference.\n\n\
                  Without CONTEXT arguments an interactive multi-select prompt is shown. \
                  Press Esc or q to quit without changing anything."
)]
pub struct Cli {
    /// Contexts to remove (skips the interactive prompt)
    #[arg(value_name = "CONTEXT")]
    pub contexts: Vec<String>,

    /// Use a particular kubeconfig file
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Remove stale users, not referenced by any context
    #[arg(
        short = 'u',
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub remove_stale_users: bool,

    /// Remove stale clusters, not referenced by any context
    #[arg(
        short = 'c',
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub remove_stale_clusters: bool,

    /// Keep clusters and users that a remaining context still references
    #[arg(long, default_value_t = false)]
    pub keep_shared: bool,

    /// Show what would be removed without writing the file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Pruning options derived from the parsed flags
    pub fn prune_options(&self) -> PruneOptions {
        PruneOptions {
            remove_stale_clusters: self.remove_stale_clusters,
            remove_stale_users: self.remove_stale_users,
            keep_shared_references: self.keep_shared,
        }
    }
}
