/// All errors raised by the audit log core and its adapters.
///
/// Storage failures are carried as `Persistence` and surfaced unchanged;
/// nothing in this crate retries them.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Persistence failure: {detail}")]
    Persistence { detail: String },

    #[error(
        "Malformed stored data in column '{column}': {value}\n\n  \
         The value read from storage does not match the expected schema.\n  \
         This usually means the audit log table was written by a different version."
    )]
    MalformedStoredData { column: String, value: String },

    #[error("Invalid search criteria: {detail}")]
    InvalidCriteria { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AuditError {
    pub(crate) fn persistence(detail: impl Into<String>) -> Self {
        AuditError::Persistence {
            detail: detail.into(),
        }
    }

    pub(crate) fn malformed(column: &str, value: impl Into<String>) -> Self {
        AuditError::MalformedStoredData {
            column: column.to_string(),
            value: value.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditError>;
