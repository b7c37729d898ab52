use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community posts can be filed under. `slug` is the external key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Short reference to the group a post belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
    pub author: String,
    pub group: Option<GroupRef>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}
