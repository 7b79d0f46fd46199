//! Kubeconfig path resolution from multiple sources

use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::kubeconfig as kubeconfig_config;
use crate::error::{CleanupError, Result};

/// Resolve the kubeconfig files to operate on, in precedence order:
/// 1. --kubeconfig CLI flag (that file only)
/// 2. KUBECONFIG env var (every existing entry, else the first entry)
/// 3. ~/.kube/config
pub fn resolve_kubeconfig_paths(explicit: Option<&Path>) -> Result<Vec<PathBuf>> {
    resolve_from(
        explicit,
        std::env::var_os(kubeconfig_config::ENV_VAR),
        dirs::home_dir(),
    )
}

fn resolve_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    // 1. CLI flag
    if let Some(path) = explicit {
        debug!("Using kubeconfig from CLI flag: {}", path.display());
        return Ok(vec![path.to_path_buf()]);
    }

    // 2. Environment variable
    if let Some(value) = env_value {
        let mut candidates: Vec<PathBuf> = Vec::new();
        for path in std::env::split_paths(&value) {
            if !path.as_os_str().is_empty() && !candidates.contains(&path) {
                candidates.push(path);
            }
        }

        let existing: Vec<PathBuf> = candidates.iter().filter(|p| p.exists()).cloned().collect();
        if !existing.is_empty() {
            debug!(
                "Using kubeconfig files from {} env var: {:?}",
                kubeconfig_config::ENV_VAR,
                existing
            );
            return Ok(existing);
        }
        if let Some(first) = candidates.into_iter().next() {
            debug!(
                "No file listed in {} exists, using {}",
                kubeconfig_config::ENV_VAR,
                first.display()
            );
            return Ok(vec![first]);
        }
    }

    // 3. Home directory default
    let home = home.ok_or_else(|| {
        CleanupError::load(
            Path::new(kubeconfig_config::FILE_NAME),
            format!(
                "could not determine home directory; pass --kubeconfig or set {}",
                kubeconfig_config::ENV_VAR
            ),
        )
    })?;
    let path = home
        .join(kubeconfig_config::DIR_NAME)
        .join(kubeconfig_config::FILE_NAME);
    debug!("Using default kubeconfig: {}", path.display());
    Ok(vec![path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_flag_wins() {
        let result = resolve_from(
            Some(Path::new("/explicit/config")),
            Some(OsString::from("/env/config")),
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();
        assert_eq!(result, vec![PathBuf::from("/explicit/config")]);
    }

    #[test]
    fn test_env_var_used_without_flag() {
        let result = resolve_from(
            None,
            Some(OsString::from("/env/config")),
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();
        assert_eq!(result, vec![PathBuf::from("/env/config")]);
    }

    #[test]
    fn test_env_var_keeps_every_existing_entry() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");
        let missing = dir.path().join("missing");
        let second = dir.path().join("second");
        fs::write(&first, "kind: Config\n").unwrap();
        fs::write(&second, "kind: Config\n").unwrap();

        let value = std::env::join_paths([&first, &missing, &second, &first]).unwrap();
        let result = resolve_from(None, Some(value), None).unwrap();
        assert_eq!(result, vec![first, second]);
    }

    #[test]
    fn test_env_var_falls_back_to_first_entry() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a");
        let second = dir.path().join("b");

        let value = std::env::join_paths([&first, &second]).unwrap();
        let result = resolve_from(None, Some(value), None).unwrap();
        assert_eq!(result, vec![first]);
    }

    #[test]
    fn test_empty_env_var_uses_home() {
        let result = resolve_from(None, Some(OsString::new()), Some(PathBuf::from("/home/me")))
            .unwrap();
        assert_eq!(result, vec![PathBuf::from("/home/me/.kube/config")]);
    }

    #[test]
    fn test_home_default() {
        let result = resolve_from(None, None, Some(PathBuf::from("/home/me"))).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].ends_with(".kube/config"));
    }

    #[test]
    fn test_no_home_errors() {
        let result = resolve_from(None, None, None);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("--kubeconfig"));
    }
}
