//! Kubeconfig document data models
//!
//! Only the fields the cleanup needs are typed. Everything else is captured in
//! flattened mappings so it round-trips untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_yml::Mapping;

/// Top-level kubeconfig document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeConfig {
    #[serde(rename = "apiVersion", skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,
    #[serde(rename = "current-context", skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Credentials, keyed by name
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<NamedEntry>,
    /// `preferences`, `extensions` and any other top-level keys
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A named cluster or user entry whose body is never inspected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
    #[serde(flatten)]
    pub body: Mapping,
}

/// A named context entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: ContextSpec,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Cluster and user binding of a context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    /// `namespace`, `extensions` and anything else
    #[serde(flatten)]
    pub extra: Mapping,
}

impl NamedEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: Mapping::new(),
        }
    }
}

impl NamedContext {
    pub fn new(name: &str, cluster: &str, user: &str) -> Self {
        Self {
            name: name.to_string(),
            context: ContextSpec {
                cluster: cluster.to_string(),
                user: user.to_string(),
                extra: Mapping::new(),
            },
            extra: Mapping::new(),
        }
    }

    /// Namespace bound to the context, if any
    pub fn namespace(&self) -> Option<&str> {
        self.context.extra.get("namespace").and_then(|v| v.as_str())
    }

    /// Short cluster/user/namespace summary
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("cluster: {}", display_ref(&self.context.cluster)),
            format!("user: {}", display_ref(&self.context.user)),
        ];
        if let Some(ns) = self.namespace() {
            parts.push(format!("namespace: {}", ns));
        }
        parts.join(", ")
    }

    /// Full context definition on one line, including extensions and other extras.
    /// Falls back to [`summary`](Self::summary) for definitions JSON cannot hold.
    pub fn preview(&self) -> String {
        serde_json::to_string(&self.context).unwrap_or_else(|_| self.summary())
    }
}

impl KubeConfig {
    /// Names of all contexts, in document order
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.iter().any(|c| c.name == name)
    }

    pub fn has_cluster(&self, name: &str) -> bool {
        self.clusters.iter().any(|c| c.name == name)
    }

    pub fn has_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u.name == name)
    }
}

fn display_ref(name: &str) -> &str {
    if name.is_empty() {
        "<none>"
    } else {
        name
    }
}

/// Treat an explicit YAML `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
