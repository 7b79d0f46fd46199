//! Context removal and cluster/user pruning
//!
//! Pruning is split into two phases: [`PrunePlan::build`] inspects an immutable
//! snapshot of the document and decides what goes, [`PrunePlan::apply`] then
//! performs the removals.

use log::{debug, warn};
use std::collections::BTreeSet;
use std::fmt;

use crate::kubeconfig::{KubeConfig, NamedContext};

/// Options controlling which entries besides the selected contexts are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneOptions {
    /// Remove clusters not referenced by any remaining context
    pub remove_stale_clusters: bool,
    /// Remove users not referenced by any remaining context
    pub remove_stale_users: bool,
    /// Keep a cluster/user referenced by a removed context if a remaining context still uses it
    pub keep_shared_references: bool,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            remove_stale_clusters: true,
            remove_stale_users: true,
            keep_shared_references: false,
        }
    }
}

/// Kind of kubeconfig entry being removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Context,
    Cluster,
    User,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Context => write!(f, "context"),
            EntryKind::Cluster => write!(f, "cluster"),
            EntryKind::User => write!(f, "user"),
        }
    }
}

/// Why an entry is removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalReason {
    /// Context chosen by the user
    Selected,
    /// Referenced by the named removed context
    ReferencedBy(String),
    /// Not referenced by any remaining context
    Stale,
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::Selected => write!(f, "selected"),
            RemovalReason::ReferencedBy(ctx) => write!(f, "referenced by context '{}'", ctx),
            RemovalReason::Stale => write!(f, "stale"),
        }
    }
}

/// A single planned removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub kind: EntryKind,
    pub name: String,
    pub reason: RemovalReason,
}

/// Removals computed from a document snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    removals: Vec<Removal>,
}

impl PrunePlan {
    /// Compute what to remove for the given selection.
    ///
    /// Selected names that are not in the document are ignored. Clusters and users
    /// referenced by a removed context are removed even when a remaining context
    /// still uses them, unless `keep_shared_references` is set.
    pub fn build(config: &KubeConfig, selected: &[String], options: PruneOptions) -> Self {
        let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
        let mut plan = PrunePlan::default();

        let (removed, remaining): (Vec<_>, Vec<_>) = config
            .contexts
            .iter()
            .partition(|ctx| selected.contains(ctx.name.as_str()));

        let referenced_clusters: BTreeSet<&str> =
            remaining.iter().map(|c| c.context.cluster.as_str()).collect();
        let referenced_users: BTreeSet<&str> =
            remaining.iter().map(|c| c.context.user.as_str()).collect();

        for ctx in &removed {
            plan.push(EntryKind::Context, &ctx.name, RemovalReason::Selected);
        }

        for ctx in &removed {
            let refs = [
                (EntryKind::Cluster, ctx.context.cluster.as_str(), &referenced_clusters),
                (EntryKind::User, ctx.context.user.as_str(), &referenced_users),
            ];
            for (kind, name, still_referenced) in refs {
                if !entry_exists(config, kind, name) {
                    debug!("Context '{}' references missing {} '{}'", ctx.name, kind, name);
                    continue;
                }
                if still_referenced.contains(name) {
                    let users = users_of(&remaining, kind, name);
                    if options.keep_shared_references {
                        debug!("Keeping {} '{}', still used by {}", kind, name, users);
                        continue;
                    }
                    warn!(
                        "Removing {} '{}' referenced by context '{}' although it is still used by {}",
                        kind, name, ctx.name, users
                    );
                }
                plan.push(kind, name, RemovalReason::ReferencedBy(ctx.name.clone()));
            }
        }

        if options.remove_stale_clusters {
            for cluster in &config.clusters {
                if !referenced_clusters.contains(cluster.name.as_str()) {
                    plan.push(EntryKind::Cluster, &cluster.name, RemovalReason::Stale);
                }
            }
        }

        if options.remove_stale_users {
            for user in &config.users {
                if !referenced_users.contains(user.name.as_str()) {
                    plan.push(EntryKind::User, &user.name, RemovalReason::Stale);
                }
            }
        }

        if let Some(current) = config.current_context.as_deref() {
            if selected.contains(current) && config.has_context(current) {
                warn!(
                    "current-context '{}' is being removed and will point to a missing context",
                    current
                );
            }
        }

        plan
    }

    /// Record a removal unless the same entry is already planned
    fn push(&mut self, kind: EntryKind, name: &str, reason: RemovalReason) {
        if self.contains(kind, name) {
            return;
        }
        self.removals.push(Removal {
            kind,
            name: name.to_string(),
            reason,
        });
    }

    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    pub fn contains(&self, kind: EntryKind, name: &str) -> bool {
        self.removals
            .iter()
            .any(|r| r.kind == kind && r.name == name)
    }

    /// Number of planned removals of the given kind
    pub fn count(&self, kind: EntryKind) -> usize {
        self.removals.iter().filter(|r| r.kind == kind).count()
    }

    fn names(&self, kind: EntryKind) -> BTreeSet<&str> {
        self.removals
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Apply the removals to the document
    pub fn apply(&self, config: &mut KubeConfig) {
        let contexts = self.names(EntryKind::Context);
        let clusters = self.names(EntryKind::Cluster);
        let users = self.names(EntryKind::User);

        config
            .contexts
            .retain(|c| !contexts.contains(c.name.as_str()));
        config
            .clusters
            .retain(|c| !clusters.contains(c.name.as_str()));
        config.users.retain(|u| !users.contains(u.name.as_str()));
    }
}

/// Remove the selected contexts and prune clusters/users as configured
pub fn prune(config: &mut KubeConfig, selected: &[String], options: PruneOptions) -> PrunePlan {
    let plan = PrunePlan::build(config, selected, options);
    plan.apply(config);
    plan
}

fn entry_exists(config: &KubeConfig, kind: EntryKind, name: &str) -> bool {
    match kind {
        EntryKind::Context => config.has_context(name),
        EntryKind::Cluster => config.has_cluster(name),
        EntryKind::User => config.has_user(name),
    }
}

/// Describe which remaining contexts use a cluster or user
fn users_of(remaining: &[&NamedContext], kind: EntryKind, name: &str) -> String {
    let names: Vec<String> = remaining
        .iter()
        .filter(|c| match kind {
            EntryKind::Cluster => c.context.cluster == name,
            EntryKind::User => c.context.user == name,
            EntryKind::Context => false,
        })
        .map(|c| format!("'{}'", c.name))
        .collect();
    format!("context {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubeconfig::NamedEntry;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn config(contexts: &[(&str, &str, &str)], clusters: &[&str], users: &[&str]) -> KubeConfig {
        KubeConfig {
            contexts: contexts
                .iter()
                .map(|(n, c, u)| NamedContext::new(n, c, u))
                .collect(),
            clusters: clusters.iter().map(|n| NamedEntry::new(n)).collect(),
            users: users.iter().map(|n| NamedEntry::new(n)).collect(),
            ..Default::default()
        }
    }

    fn cluster_names(config: &KubeConfig) -> Vec<&str> {
        config.clusters.iter().map(|c| c.name.as_str()).collect()
    }

    fn user_names(config: &KubeConfig) -> Vec<&str> {
        config.users.iter().map(|u| u.name.as_str()).collect()
    }

    fn no_stale() -> PruneOptions {
        PruneOptions {
            remove_stale_clusters: false,
            remove_stale_users: false,
            keep_shared_references: false,
        }
    }

    fn shared_scenario() -> KubeConfig {
        config(
            &[("A", "cluster1", "userA"), ("B", "cluster1", "userB")],
            &["cluster1"],
            &["userA", "userB"],
        )
    }

    #[test]
    fn test_default_options() {
        let opts = PruneOptions::default();
        assert!(opts.remove_stale_clusters);
        assert!(opts.remove_stale_users);
        assert!(!opts.keep_shared_references);
    }

    #[test]
    fn test_removes_selected_contexts_only() {
        let mut cfg = config(
            &[("a", "c1", "u1"), ("b", "c2", "u2"), ("c", "c3", "u3")],
            &["c1", "c2", "c3"],
            &["u1", "u2", "u3"],
        );
        prune(&mut cfg, &names(&["a", "c"]), PruneOptions::default());
        assert_eq!(cfg.context_names(), vec!["b"]);
        assert_eq!(cluster_names(&cfg), vec!["c2"]);
        assert_eq!(user_names(&cfg), vec!["u2"]);
    }

    #[test]
    fn test_shared_cluster_removed_by_default() {
        let mut cfg = shared_scenario();
        let plan = prune(&mut cfg, &names(&["A"]), PruneOptions::default());

        assert_eq!(cfg.context_names(), vec!["B"]);
        assert!(cfg.clusters.is_empty());
        assert_eq!(user_names(&cfg), vec!["userB"]);
        assert_eq!(
            plan.removals()[1],
            Removal {
                kind: EntryKind::Cluster,
                name: "cluster1".to_string(),
                reason: RemovalReason::ReferencedBy("A".to_string()),
            }
        );
    }

    #[test]
    fn test_shared_cluster_kept_with_keep_shared() {
        let mut cfg = shared_scenario();
        let opts = PruneOptions {
            keep_shared_references: true,
            ..Default::default()
        };
        prune(&mut cfg, &names(&["A"]), opts);

        assert_eq!(cfg.context_names(), vec!["B"]);
        assert_eq!(cluster_names(&cfg), vec!["cluster1"]);
        assert_eq!(user_names(&cfg), vec!["userB"]);
    }

    #[test]
    fn test_direct_orphans_removed_regardless_of_flags() {
        let mut cfg = config(
            &[("a", "c1", "u1"), ("b", "c2", "u2")],
            &["c1", "c2", "unused-cluster"],
            &["u1", "u2", "unused-user"],
        );
        prune(&mut cfg, &names(&["a"]), no_stale());

        assert_eq!(cluster_names(&cfg), vec!["c2", "unused-cluster"]);
        assert_eq!(user_names(&cfg), vec!["u2", "unused-user"]);
    }

    #[test]
    fn test_stale_flags_are_independent() {
        let base = config(&[("a", "c1", "u1")], &["c1", "old"], &["u1", "old"]);

        let mut cfg = base.clone();
        let opts = PruneOptions {
            remove_stale_clusters: true,
            ..no_stale()
        };
        prune(&mut cfg, &[], opts);
        assert_eq!(cluster_names(&cfg), vec!["c1"]);
        assert_eq!(user_names(&cfg), vec!["u1", "old"]);

        let mut cfg = base;
        let opts = PruneOptions {
            remove_stale_users: true,
            ..no_stale()
        };
        prune(&mut cfg, &[], opts);
        assert_eq!(cluster_names(&cfg), vec!["c1", "old"]);
        assert_eq!(user_names(&cfg), vec!["u1"]);
    }

    #[test]
    fn test_stale_sweep_leaves_only_referenced_entries() {
        let mut cfg = config(
            &[("a", "c1", "u1"), ("b", "c2", "u2"), ("c", "c2", "u3")],
            &["c1", "c2", "c9"],
            &["u1", "u2", "u3", "u9"],
        );
        prune(&mut cfg, &names(&["b"]), PruneOptions::default());

        for cluster in &cfg.clusters {
            assert!(cfg.contexts.iter().any(|c| c.context.cluster == cluster.name));
        }
        for user in &cfg.users {
            assert!(cfg.contexts.iter().any(|c| c.context.user == user.name));
        }
        assert_eq!(cfg.context_names(), vec!["a", "c"]);
        assert_eq!(user_names(&cfg), vec!["u1", "u3"]);
    }

    #[test]
    fn test_dangling_references_tolerated() {
        let mut cfg = config(&[("a", "ghost", "phantom"), ("b", "c1", "u1")], &["c1"], &["u1"]);
        let plan = prune(&mut cfg, &names(&["a"]), PruneOptions::default());

        assert_eq!(plan.count(EntryKind::Context), 1);
        assert_eq!(plan.count(EntryKind::Cluster), 0);
        assert_eq!(plan.count(EntryKind::User), 0);
        assert_eq!(cluster_names(&cfg), vec!["c1"]);
    }

    #[test]
    fn test_unknown_selection_ignored() {
        let mut cfg = config(&[("a", "c1", "u1")], &["c1"], &["u1"]);
        let before = cfg.clone();
        let plan = prune(&mut cfg, &names(&["nope"]), PruneOptions::default());
        assert!(plan.is_empty());
        assert_eq!(cfg, before);
    }

    #[test]
    fn test_entries_listed_once() {
        let mut cfg = config(
            &[("a", "c1", "u1"), ("b", "c1", "u1")],
            &["c1"],
            &["u1"],
        );
        let plan = prune(&mut cfg, &names(&["a", "b", "a"]), PruneOptions::default());
        assert_eq!(plan.count(EntryKind::Context), 2);
        assert_eq!(plan.count(EntryKind::Cluster), 1);
        assert_eq!(plan.count(EntryKind::User), 1);
        assert!(cfg.contexts.is_empty());
        assert!(cfg.clusters.is_empty());
        assert!(cfg.users.is_empty());
    }

    #[test]
    fn test_stale_reason_recorded() {
        let cfg = config(&[("a", "c1", "u1")], &["c1", "old"], &["u1"]);
        let plan = PrunePlan::build(&cfg, &[], PruneOptions::default());
        assert_eq!(
            plan.removals(),
            &[Removal {
                kind: EntryKind::Cluster,
                name: "old".to_string(),
                reason: RemovalReason::Stale,
            }]
        );
    }

    #[test]
    fn test_build_does_not_mutate() {
        let cfg = shared_scenario();
        let before = cfg.clone();
        let plan = PrunePlan::build(&cfg, &names(&["A", "B"]), PruneOptions::default());
        assert_eq!(cfg, before);
        assert!(plan.contains(EntryKind::Context, "A"));
        assert!(plan.contains(EntryKind::User, "userB"));
    }

    #[test]
    fn test_idempotent_with_empty_selection() {
        for opts in [PruneOptions::default(), no_stale()] {
            let mut cfg = config(
                &[("a", "c1", "u1"), ("b", "c2", "u2")],
                &["c1", "c2", "c3"],
                &["u1", "u2", "u3"],
            );
            prune(&mut cfg, &names(&["a"]), opts);
            let first = cfg.clone();
            let plan = prune(&mut cfg, &[], opts);
            assert!(plan.is_empty());
            assert_eq!(cfg, first);
        }
    }

    #[test]
    fn test_current_context_left_untouched() {
        let mut cfg = shared_scenario();
        cfg.current_context = Some("A".to_string());
        prune(&mut cfg, &names(&["A"]), PruneOptions::default());
        assert_eq!(cfg.current_context.as_deref(), Some("A"));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(RemovalReason::Selected.to_string(), "selected");
        assert_eq!(RemovalReason::Stale.to_string(), "stale");
        assert_eq!(
            RemovalReason::ReferencedBy("prod".to_string()).to_string(),
            "referenced by context 'prod'"
        );
        assert_eq!(EntryKind::User.to_string(), "user");
    }
}
