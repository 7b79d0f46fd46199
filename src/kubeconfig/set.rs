//! Several kubeconfig files viewed as one document
//!
//! Merging follows the kubectl loading rules: for each named context, cluster
//! and user the first file that defines it wins, and `current-context` comes
//! from the first file that sets one. Removals are written back to every file
//! holding the entry.

use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::prune::PrunePlan;

use super::models::{KubeConfig, NamedEntry};
use super::store::KubeconfigStore;

struct LoadedFile {
    store: KubeconfigStore,
    config: KubeConfig,
}

/// Kubeconfig files loaded in precedence order
pub struct KubeconfigSet {
    files: Vec<LoadedFile>,
}

impl KubeconfigSet {
    /// Load every file; any missing or malformed file is an error
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let store = KubeconfigStore::with_path(path.clone());
            let config = store.load()?;
            files.push(LoadedFile { store, config });
        }
        Ok(Self { files })
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.store.path()).collect()
    }

    /// Paths for messages, e.g. "/a/config, /b/config"
    pub fn display_paths(&self) -> String {
        self.paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Single document with the first definition of each name
    pub fn merged(&self) -> KubeConfig {
        let mut merged = match self.files.first() {
            Some(first) => KubeConfig {
                api_version: first.config.api_version.clone(),
                kind: first.config.kind.clone(),
                extra: first.config.extra.clone(),
                ..Default::default()
            },
            None => return KubeConfig::default(),
        };

        let mut seen_contexts = BTreeSet::new();
        let mut seen_clusters = BTreeSet::new();
        let mut seen_users = BTreeSet::new();

        for file in &self.files {
            let config = &file.config;
            if merged.current_context.is_none() {
                merged.current_context = config.current_context.clone();
            }
            for ctx in &config.contexts {
                if seen_contexts.insert(ctx.name.clone()) {
                    merged.contexts.push(ctx.clone());
                } else {
                    debug!(
                        "Context '{}' in {} is shadowed by an earlier file",
                        ctx.name,
                        file.store.path().display()
                    );
                }
            }
            merge_entries(&mut merged.clusters, &mut seen_clusters, &config.clusters);
            merge_entries(&mut merged.users, &mut seen_users, &config.users);
        }

        merged
    }

    /// Apply the plan to each file and save the files that changed.
    /// Returns the paths written.
    pub fn apply_and_save(&mut self, plan: &PrunePlan) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for file in &mut self.files {
            let before = file.config.clone();
            plan.apply(&mut file.config);
            if file.config == before {
                debug!("No changes for {}", file.store.path().display());
                continue;
            }
            file.store.save(&file.config)?;
            written.push(file.store.path().to_path_buf());
        }
        Ok(written)
    }
}

fn merge_entries(into: &mut Vec<NamedEntry>, seen: &mut BTreeSet<String>, from: &[NamedEntry]) {
    for entry in from {
        if seen.insert(entry.name.clone()) {
            into.push(entry.clone());
        }
    }
}
