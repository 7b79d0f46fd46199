//! Kubeconfig file I/O

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::kubeconfig as kubeconfig_config;
use crate::error::{CleanupError, Result};

use super::models::KubeConfig;

/// Handles reading and writing a single kubeconfig file
pub struct KubeconfigStore {
    config_path: PathBuf,
}

impl KubeconfigStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the kubeconfig from disk.
    /// Errors if the file is missing or not a kubeconfig; an empty file loads as an empty document.
    pub fn load(&self) -> Result<KubeConfig> {
        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| CleanupError::load(&self.config_path, e.to_string()))?;

        if content.trim().is_empty() {
            debug!(
                "Kubeconfig {} is empty, treating as empty document",
                self.config_path.display()
            );
            return Ok(KubeConfig::default());
        }

        let config: KubeConfig = serde_yml::from_str(&content)
            .map_err(|e| CleanupError::load(&self.config_path, e.to_string()))?;

        debug!(
            "Loaded {} with {} contexts, {} clusters, {} users",
            self.config_path.display(),
            config.contexts.len(),
            config.clusters.len(),
            config.users.len()
        );
        Ok(config)
    }

    /// Save the kubeconfig to disk.
    /// Follows symlinks, then writes a tmp file next to the target and renames it over.
    pub fn save(&self, config: &KubeConfig) -> Result<()> {
        let target = self.resolve_target();

        let yaml = serde_yml::to_string(config)
            .map_err(|e| CleanupError::write(&target, format!("serialization failed: {}", e)))?;

        let tmp_path = tmp_path_for(&target);
        fs::write(&tmp_path, &yaml).map_err(|e| {
            CleanupError::write(
                &target,
                format!("could not write temp file {}: {}", tmp_path.display(), e),
            )
        })?;

        // Kubeconfigs carry credentials; keep them private on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            if let Err(e) = fs::set_permissions(&tmp_path, permissions) {
                let _ = fs::remove_file(&tmp_path);
                return Err(CleanupError::write(
                    &target,
                    format!("could not set permissions: {}", e),
                ));
            }
        }

        if let Err(e) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CleanupError::write(
                &target,
                format!("could not replace file: {}", e),
            ));
        }

        debug!("Wrote {}", target.display());
        Ok(())
    }

    /// Real file behind the configured path, so a symlinked kubeconfig stays a symlink
    fn resolve_target(&self) -> PathBuf {
        fs::canonicalize(&self.config_path).unwrap_or_else(|_| self.config_path.clone())
    }
}

fn tmp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| kubeconfig_config::FILE_NAME.to_string());
    target.with_file_name(format!("{}.{}", file_name, kubeconfig_config::TMP_SUFFIX))
}
