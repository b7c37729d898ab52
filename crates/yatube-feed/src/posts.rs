//! Post and comment mutations, plus the post detail view.
//!
//! Input is validated here before it touches the store. None of these
//! operations touch the page cache.

use chrono::Utc;
use tracing::info;
use yatube_db::Database;
use yatube_types::api::PostDetailResponse;
use yatube_types::models::Comment;

use crate::convert::{comment_from_row, post_from_row};
use crate::error::FeedError;
use crate::resolver::find_group;
use crate::viewer::Viewer;

pub const COMMENT_MAX_CHARS: usize = 150;

/// Fields of a post being created or edited.
#[derive(Debug, Clone, Copy)]
pub struct PostDraft<'a> {
    pub text: &'a str,
    /// Group slug. `None` leaves the post ungrouped.
    pub group: Option<&'a str>,
    pub image: Option<&'a str>,
}

/// Outcome of an author-only action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorAction {
    Done,
    /// The viewer is not the post's author; nothing changed.
    NotAuthor,
}

pub fn create_post(db: &Database, viewer: &Viewer, draft: PostDraft<'_>) -> Result<i64, FeedError> {
    let author_id = viewer.require_user()?;
    let group_id = validate_draft(db, &draft)?;

    let id = db.insert_post(&author_id, draft.text, group_id, draft.image, Utc::now())?;
    info!("Post {} created by {}", id, author_id);
    Ok(id)
}

pub fn edit_post(
    db: &Database,
    viewer: &Viewer,
    post_id: i64,
    draft: PostDraft<'_>,
) -> Result<AuthorAction, FeedError> {
    if !is_author(db, viewer, post_id)? {
        return Ok(AuthorAction::NotAuthor);
    }
    let group_id = validate_draft(db, &draft)?;

    if !db.update_post(post_id, draft.text, group_id, draft.image)? {
        return Err(FeedError::not_found("post"));
    }
    info!("Post {} edited", post_id);
    Ok(AuthorAction::Done)
}

pub fn delete_post(db: &Database, viewer: &Viewer, post_id: i64) -> Result<AuthorAction, FeedError> {
    if !is_author(db, viewer, post_id)? {
        return Ok(AuthorAction::NotAuthor);
    }
    if !db.delete_post(post_id)? {
        return Err(FeedError::not_found("post"));
    }
    info!("Post {} deleted", post_id);
    Ok(AuthorAction::Done)
}

pub fn add_comment(
    db: &Database,
    viewer: &Viewer,
    post_id: i64,
    text: &str,
) -> Result<Comment, FeedError> {
    let Viewer::User { id: author_id, username } = viewer else {
        return Err(FeedError::Authorization);
    };
    validate_comment(text)?;
    if db.get_post(post_id)?.is_none() {
        return Err(FeedError::not_found("post"));
    }

    let created = Utc::now();
    let id = db.insert_comment(post_id, &author_id.to_string(), text, created)?;

    Ok(Comment {
        id,
        post_id,
        author: username.clone(),
        text: text.to_string(),
        created,
    })
}

/// A post with its author's post count and its comments, newest first.
pub fn post_detail(db: &Database, post_id: i64) -> Result<PostDetailResponse, FeedError> {
    let row = db.get_post(post_id)?.ok_or(FeedError::not_found("post"))?;
    let post_count = db.count_posts_by_author(&row.author_id)?;
    let comments = db
        .get_comments(post_id)?
        .into_iter()
        .map(comment_from_row)
        .collect();

    Ok(PostDetailResponse {
        post: post_from_row(row),
        post_count,
        comments,
    })
}

fn is_author(db: &Database, viewer: &Viewer, post_id: i64) -> Result<bool, FeedError> {
    let user_id = viewer.require_user()?;
    let post = db.get_post(post_id)?.ok_or(FeedError::not_found("post"))?;
    Ok(post.author_id == user_id)
}

fn validate_draft(db: &Database, draft: &PostDraft<'_>) -> Result<Option<i64>, FeedError> {
    if draft.text.trim().is_empty() {
        return Err(FeedError::validation("text", "This field is required."));
    }

    match draft.group {
        None => Ok(None),
        Some(slug) => match find_group(db, slug) {
            Ok(group) => Ok(Some(group.id)),
            Err(FeedError::NotFound { .. }) => {
                Err(FeedError::validation("group", format!("Unknown group `{slug}`.")))
            }
            Err(e) => Err(e),
        },
    }
}

fn validate_comment(text: &str) -> Result<(), FeedError> {
    if text.trim().is_empty() {
        return Err(FeedError::validation("text", "This field is required."));
    }
    let len = text.chars().count();
    if len > COMMENT_MAX_CHARS {
        return Err(FeedError::validation(
            "text",
            format!("Ensure this value has at most {COMMENT_MAX_CHARS} characters (it has {len})."),
        ));
    }
    Ok(())
}
