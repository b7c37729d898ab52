use yatube_db::models::{GroupRow, UserRow};
use yatube_db::{Database, PostFilter};
use yatube_types::models::Post;

use crate::context::FeedContext;
use crate::convert::post_from_row;
use crate::error::FeedError;
use crate::viewer::Viewer;

/// Every post visible in `context` to `viewer`, newest first.
///
/// Reads the store as it is right now; nothing here is cached or paged.
pub fn resolve(db: &Database, context: &FeedContext, viewer: &Viewer) -> Result<Vec<Post>, FeedError> {
    let rows = match context {
        FeedContext::AllPosts => db.list_posts(PostFilter::All)?,
        FeedContext::ByGroup(slug) => {
            let group = find_group(db, slug)?;
            db.list_posts(PostFilter::Group(group.id))?
        }
        FeedContext::ByAuthor(username) => {
            let author = find_user(db, username)?;
            db.list_posts(PostFilter::Author(&author.id))?
        }
        FeedContext::FollowedFeed => {
            let user_id = viewer.require_user()?;
            db.list_posts(PostFilter::FollowedBy(&user_id))?
        }
    };

    Ok(rows.into_iter().map(post_from_row).collect())
}

pub fn find_group(db: &Database, slug: &str) -> Result<GroupRow, FeedError> {
    db.get_group_by_slug(slug)?.ok_or(FeedError::not_found("group"))
}

pub fn find_user(db: &Database, username: &str) -> Result<UserRow, FeedError> {
    db.get_user_by_username(username)?.ok_or(FeedError::not_found("user"))
}
