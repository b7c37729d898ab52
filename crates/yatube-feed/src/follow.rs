use std::collections::BTreeSet;

use tracing::{debug, info};
use yatube_db::Database;

use crate::error::FeedError;

/// Result of a follow request. Every variant is a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Created,
    AlreadyFollowing,
    /// The viewer asked to follow themself and the policy forbids it.
    SelfFollowIgnored,
}

/// Directed "user follows author" edges, stored in the `follows` table.
///
/// Edge writes go through the store's single writer connection, so a
/// concurrent follow and unfollow of the same edge cannot interleave.
pub struct FollowGraph<'a> {
    db: &'a Database,
    allow_self_follow: bool,
}

impl<'a> FollowGraph<'a> {
    pub fn new(db: &'a Database, allow_self_follow: bool) -> Self {
        Self {
            db,
            allow_self_follow,
        }
    }

    /// Create the edge `user_id → author_id`. Repeating it is a no-op.
    pub fn follow(&self, user_id: &str, author_id: &str) -> Result<FollowOutcome, FeedError> {
        if user_id == author_id && !self.allow_self_follow {
            debug!("Ignoring self-follow by {}", user_id);
            return Ok(FollowOutcome::SelfFollowIgnored);
        }

        if self.db.insert_follow(user_id, author_id)? {
            info!("{} now follows {}", user_id, author_id);
            Ok(FollowOutcome::Created)
        } else {
            Ok(FollowOutcome::AlreadyFollowing)
        }
    }

    /// Remove the edge `user_id → author_id`. A missing edge is `NotFound`.
    pub fn unfollow(&self, user_id: &str, author_id: &str) -> Result<(), FeedError> {
        if !self.db.delete_follow(user_id, author_id)? {
            return Err(FeedError::not_found("follow"));
        }
        info!("{} unfollowed {}", user_id, author_id);
        Ok(())
    }

    pub fn is_following(&self, user_id: &str, author_id: &str) -> Result<bool, FeedError> {
        Ok(self.db.follow_exists(user_id, author_id)?)
    }

    /// Ids of every author `user_id` follows.
    pub fn followed_authors(&self, user_id: &str) -> Result<BTreeSet<String>, FeedError> {
        Ok(self.db.followed_author_ids(user_id)?.into_iter().collect())
    }
}
