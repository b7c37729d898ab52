use uuid::Uuid;

use crate::error::FeedError;

/// Who is looking at a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    User { id: Uuid, username: String },
}

impl Viewer {
    /// The viewer's user id, or `Authorization` for anonymous viewers.
    pub fn require_user(&self) -> Result<String, FeedError> {
        match self {
            Self::User { id, .. } => Ok(id.to_string()),
            Self::Anonymous => Err(FeedError::Authorization),
        }
    }

    pub fn user_id(&self) -> Option<String> {
        match self {
            Self::User { id, .. } => Some(id.to_string()),
            Self::Anonymous => None,
        }
    }
}
