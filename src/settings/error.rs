//! Settings errors.

/// Errors raised while building or reading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing setting '{0}'")]
    MissingKey(String),

    #[error("Setting '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Setting '{key}' is not a scalar value")]
    NotScalar { key: String },

    #[error("Failed to read overrides file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse overrides: {0}")]
    Parse(String),
}
