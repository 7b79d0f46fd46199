//! Kubeconfig document handling
//!
//! Locates the kubeconfig files, loads them into a typed model that keeps
//! unknown fields, merges them the way kubectl does, and writes changes back
//! atomically.

mod models;
mod resolve;
mod set;
mod store;

pub use models::{ContextSpec, KubeConfig, NamedContext, NamedEntry};
pub use resolve::resolve_kubeconfig_paths;
pub use set::KubeconfigSet;
pub use store::KubeconfigStore;
