//! Error types for sklog

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SklogError>;

#[derive(Debug, Error)]
pub enum SklogError {
    /// Empty required text, out-of-range values, unknown enum names.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("skill not found: {0}")]
    SkillNotFound(String),

    #[error("ambiguous skill reference: {0}")]
    AmbiguousSkill(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SklogError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ValidationFailed(_) => "validation_failed",
            Self::SkillNotFound(_) => "skill_not_found",
            Self::AmbiguousSkill(_) => "ambiguous_skill",
            Self::Storage(_) => "storage",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::Cancelled(_) => "cancelled",
            Self::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for SklogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
