use std::path::PathBuf;

/// Classified install failures.
///
/// These travel inside `anyhow::Error`; callers that need to branch on the
/// kind of failure use `err.downcast_ref::<InstallError>()`.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("configuration not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },
    #[error("failed to parse configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no matching targets found for: {filter}")]
    NoMatchingTargets { filter: String },
    #[error("{} is required but not found in {}", crate::fs::SKILL_DOCUMENT, source_root.display())]
    MissingSkillDocument { source_root: PathBuf },
}

impl InstallError {
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// True for failures of the configuration document itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::InvalidConfig(_)
        )
    }
}
