use crate::models::{CommentRow, GroupRow, PostRow, UserRow};
use crate::{Database, format_timestamp};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::{Connection, Row};

/// Which posts a listing query selects. Each variant is served by an index.
#[derive(Debug, Clone, Copy)]
pub enum PostFilter<'a> {
    All,
    Group(i64),
    /// Posts written by one author id.
    Author(&'a str),
    /// Posts by every author the given user id follows.
    FollowedBy(&'a str),
}

const POST_SELECT: &str = "SELECT p.id, p.text, p.created, p.author_id, u.username, g.slug, g.title, p.image
     FROM posts p
     JOIN users u ON u.id = p.author_id
     LEFT JOIN post_groups g ON g.id = p.group_id";

// Newest first; equal timestamps fall back to the later insert first.
const POST_ORDER: &str = "ORDER BY p.created DESC, p.id DESC";

impl Database {
    // -- Users --

    /// Insert a user. Returns false, and writes nothing, when the username
    /// is already taken.
    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)
                 ON CONFLICT (username) DO NOTHING",
                (id, username, password_hash),
            )?;
            Ok(inserted > 0)
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, username, password FROM users WHERE username = ?1",
                [username],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                    })
                },
            )
            .optional()
        })
    }

    // -- Groups --

    pub fn create_group(&self, title: &str, slug: &str, description: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO post_groups (title, slug, description) VALUES (?1, ?2, ?3)",
                (title, slug, description),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_group_by_slug(&self, slug: &str) -> Result<Option<GroupRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, title, slug, description FROM post_groups WHERE slug = ?1",
                [slug],
                |row| {
                    Ok(GroupRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        slug: row.get(2)?,
                        description: row.get(3)?,
                    })
                },
            )
            .optional()
        })
    }

    /// Remove a group. Its posts stay and lose their group.
    pub fn delete_group(&self, slug: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM post_groups WHERE slug = ?1", [slug])?;
            Ok(removed > 0)
        })
    }

    // -- Posts --

    pub fn insert_post(
        &self,
        author_id: &str,
        text: &str,
        group_id: Option<i64>,
        image: Option<&str>,
        created: DateTime<Utc>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (text, created, author_id, group_id, image) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![text, format_timestamp(created), author_id, group_id, image],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!("{POST_SELECT} WHERE p.id = ?1");
            conn.query_row(&sql, [id], post_from_row).optional()
        })
    }

    /// Overwrite the editable fields of a post. Author and creation time
    /// never change. Returns false if the post does not exist.
    pub fn update_post(
        &self,
        id: i64,
        text: &str,
        group_id: Option<i64>,
        image: Option<&str>,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE posts SET text = ?1, group_id = ?2, image = ?3 WHERE id = ?4",
                rusqlite::params![text, group_id, image, id],
            )?;
            Ok(updated > 0)
        })
    }

    /// Delete a post and, by cascade, its comments.
    pub fn delete_post(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    pub fn list_posts(&self, filter: PostFilter<'_>) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| match filter {
            PostFilter::All => query_posts(conn, "", &[]),
            PostFilter::Group(group_id) => query_posts(conn, "WHERE p.group_id = ?1", &[&group_id]),
            PostFilter::Author(author_id) => {
                query_posts(conn, "WHERE p.author_id = ?1", &[&author_id])
            }
            PostFilter::FollowedBy(user_id) => query_posts(
                conn,
                "WHERE p.author_id IN (SELECT author_id FROM follows WHERE user_id = ?1)",
                &[&user_id],
            ),
        })
    }

    pub fn count_posts_by_author(&self, author_id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM posts WHERE author_id = ?1",
                [author_id],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
    }

    // -- Comments --

    pub fn insert_comment(
        &self,
        post_id: i64,
        author_id: &str,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (post_id, author_id, text, created) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![post_id, author_id, text, format_timestamp(created)],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Comments on a post, newest first.
    pub fn get_comments(&self, post_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.post_id, u.username, c.text, c.created
                 FROM comments c
                 JOIN users u ON u.id = c.author_id
                 WHERE c.post_id = ?1
                 ORDER BY c.created DESC, c.id DESC",
            )?;

            let rows = stmt
                .query_map([post_id], |row| {
                    Ok(CommentRow {
                        id: row.get(0)?,
                        post_id: row.get(1)?,
                        author_username: row.get(2)?,
                        text: row.get(3)?,
                        created: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Follows --

    /// Insert a follow edge. Returns false when the edge already existed.
    pub fn insert_follow(&self, user_id: &str, author_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO follows (user_id, author_id) VALUES (?1, ?2)",
                (user_id, author_id),
            )?;
            Ok(inserted > 0)
        })
    }

    /// Delete a follow edge. Returns false when there was no such edge.
    pub fn delete_follow(&self, user_id: &str, author_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM follows WHERE user_id = ?1 AND author_id = ?2",
                (user_id, author_id),
            )?;
            Ok(removed > 0)
        })
    }

    pub fn follow_exists(&self, user_id: &str, author_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM follows WHERE user_id = ?1 AND author_id = ?2)",
                (user_id, author_id),
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    /// Ids of every author the user follows.
    pub fn followed_author_ids(&self, user_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT author_id FROM follows WHERE user_id = ?1")?;
            let ids = stmt
                .query_map([user_id], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(ids)
        })
    }
}

fn query_posts(conn: &Connection, filter: &str, params: &[&dyn ToSql]) -> Result<Vec<PostRow>> {
    let sql = format!("{POST_SELECT} {filter} {POST_ORDER}");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(params, post_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        text: row.get(1)?,
        created: row.get(2)?,
        author_id: row.get(3)?,
        author_username: row.get(4)?,
        group_slug: row.get(5)?,
        group_title: row.get(6)?,
        image: row.get(7)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
