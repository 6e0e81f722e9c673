use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Validation error: field '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Prediction error: {cause}")]
    Prediction { cause: String },

    #[error("Artifact load error: {message}")]
    ArtifactLoad { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn prediction(cause: impl Into<String>) -> Self {
        Self::Prediction {
            cause: cause.into(),
        }
    }

    pub fn artifact_load(message: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            message: message.into(),
        }
    }

    /// Field the error is about, if it is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
