//! kubectl-config-cleanup - Remove kubeconfig contexts and what they leave behind
//!
//! A kubectl plugin that removes selected contexts from a kubeconfig file and
//! prunes the clusters and users they referenced.
//!
//! # Features
//!
//! - Interactive multi-select of contexts, or names on the command line
//! - Removal of clusters and users referenced by removed contexts
//! - Optional sweep of clusters and users no context references
//! - Unknown kubeconfig fields are preserved
//! - Every file listed in `KUBECONFIG` is merged, the way kubectl reads them
//! - Atomic write back to each file that changed
//!
//! # Example
//!
//! ```bash
//! # Pick contexts to remove interactively
//! kubectl config-cleanup
//!
//! # Remove two contexts without prompting, keep unreferenced users
//! kubectl config-cleanup old-prod kind-test --remove-stale-users=false
//!
//! # Preview the cleanup of a specific file
//! kubectl config-cleanup --kubeconfig ./ci.yaml --dry-run ci
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod prune;
pub mod ui;

pub use cli::Cli;
pub use commands::{run_cleanup, run_cleanup_command, CleanupOutcome};
pub use error::{CleanupError, Result};
pub use kubeconfig::{
    resolve_kubeconfig_paths, KubeConfig, KubeconfigSet, KubeconfigStore, NamedContext,
};
pub use prune::{prune, EntryKind, PruneOptions, PrunePlan, Removal, RemovalReason};
pub use ui::{ContextSelector, InteractiveSelector, NamedSelector, Selection};
