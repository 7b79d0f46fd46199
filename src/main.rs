//! kubectl-config-cleanup - Main entry point

use clap::Parser;
use log::{debug, info};

use config_cleanup::{run_cleanup_command, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting kubectl-config-cleanup v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: contexts={:?}, kubeconfig={:?}, remove_stale_users={}, remove_stale_clusters={}, keep_shared={}, dry_run={}",
        cli.contexts,
        cli.kubeconfig,
        cli.remove_stale_users,
        cli.remove_stale_clusters,
        cli.keep_shared,
        cli.dry_run
    );

    match run_cleanup_command(&cli) {
        Ok(outcome) => debug!("Finished with {:?}", outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
