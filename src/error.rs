use thiserror::Error;

use crate::types::EntityKind;
use crate::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Load error ({entity}): {message}")]
    Load { entity: EntityKind, message: String },

    #[error("{0}")]
    Validation(ValidationReport),

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid date/time '{input}': {reason}")]
    InvalidDateTime { input: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[cfg(feature = "http-store")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SchedulerError {
    pub fn load(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::Load {
            entity,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_datetime(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDateTime {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Everything except a broken configuration is scoped to one form
    /// instance and can be retried by the user.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { message, .. } => message.clone(),
            Self::Storage { message } => message.clone(),
            Self::Validation(report) => report.summary(),
            other => other.to_string(),
        }
    }
}

/// A failed stage fetch, kept on the stage so the form can render it next
/// to the affected field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Load error ({entity}): {message}")]
pub struct LoadError {
    pub entity: EntityKind,
    pub message: String,
}

impl LoadError {
    pub fn new(entity: EntityKind, message: impl Into<String>) -> Self {
        Self {
            entity,
            message: message.into(),
        }
    }

    pub fn from_error(entity: EntityKind, error: &SchedulerError) -> Self {
        Self {
            entity,
            message: error.user_message(),
        }
    }
}

impl From<LoadError> for SchedulerError {
    fn from(err: LoadError) -> Self {
        Self::Load {
            entity: err.entity,
            message: err.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
