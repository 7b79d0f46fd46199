/// Configuration constants for locating and writing the kubeconfig file
pub mod kubeconfig {
    /// Environment variable holding a list of kubeconfig paths
    pub const ENV_VAR: &str = "KUBECONFIG";

    /// Directory holding the default kubeconfig (relative to HOME)
    pub const DIR_NAME: &str = ".kube";

    /// Default kubeconfig file name
    pub const FILE_NAME: &str = "config";

    /// Suffix appended to the file name for the temporary file used during save
    pub const TMP_SUFFIX: &str = "tmp";
}

/// Text shown by the interactive selector
pub mod prompt {
    /// Header displayed above the context list
    pub const HEADER: &str =
        "Use space to select contexts to remove. Users and clusters that they reference will be also removed";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
