use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("authentication required")]
    Authorization,
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl FeedError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}
