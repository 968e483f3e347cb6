use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Cache unavailable: {message}")]
    CacheUnavailable { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Queue error: {message}")]
    Queue { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn queue(message: impl Into<String>) -> Self {
        Self::Queue {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error comes from a best-effort dependency (cache, queue)
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::CacheUnavailable { .. } | Self::Queue { .. })
    }
}

/// Outcome of a best-effort side effect
///
/// Side effects such as cache writes, namespace bumps and job enqueues must
/// never fail the operation they are attached to. They report through this
/// type instead so the caller can log and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftOutcome {
    Done,
    Skipped { reason: String },
}

impl SoftOutcome {
    /// Converts a result into an outcome, logging the failure
    pub fn from_result<T>(operation: &'static str, result: Result<T, DomainError>) -> Self {
        match result {
            Ok(_) => Self::Done,
            Err(e) => {
                tracing::warn!(operation, error = %e, "Best-effort operation skipped");
                Self::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}
