use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Comment, Group, Post};

// -- JWT Claims --

/// JWT claims carried by the bearer token. `sub` is the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Posts --

/// Body of both create-post and edit-post. `group` is a group slug;
/// leaving it out on edit detaches the post from its group.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostRequest {
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: Post,
    /// Number of posts written by the post's author.
    pub post_count: u64,
    pub comments: Vec<Comment>,
}

// -- Comments --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentRequest {
    pub text: String,
}

// -- Feeds --

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// One page of a feed listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: Group,
    #[serde(flatten)]
    pub page: FeedPage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub author: String,
    pub post_count: u64,
    /// Whether the requesting viewer follows this author.
    pub following: bool,
    #[serde(flatten)]
    pub page: FeedPage,
}

// -- Follow --

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowResponse {
    pub author: String,
    pub following: bool,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Field-level rejection of a mutation body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, Vec<String>>,
}
