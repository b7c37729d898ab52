//! Row → API model conversion.

use chrono::{DateTime, Utc};
use tracing::warn;

use yatube_db::models::{CommentRow, GroupRow, PostRow};
use yatube_types::models::{Comment, Group, GroupRef, Post};

/// Parse a stored timestamp. Accepts RFC 3339 as written by the store and
/// SQLite's own `YYYY-MM-DD HH:MM:SS` default format.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .ok()
}

fn timestamp_or_default(raw: &str, what: &str, id: i64) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or_else(|| {
        warn!("Corrupt created '{}' on {} {}", raw, what, id);
        DateTime::default()
    })
}

pub fn post_from_row(row: PostRow) -> Post {
    let group = match (row.group_slug, row.group_title) {
        (Some(slug), Some(title)) => Some(GroupRef { slug, title }),
        _ => None,
    };

    Post {
        created: timestamp_or_default(&row.created, "post", row.id),
        id: row.id,
        text: row.text,
        author: row.author_username,
        group,
        image: row.image,
    }
}

pub fn comment_from_row(row: CommentRow) -> Comment {
    Comment {
        created: timestamp_or_default(&row.created, "comment", row.id),
        id: row.id,
        post_id: row.post_id,
        author: row.author_username,
        text: row.text,
    }
}

pub fn group_from_row(row: GroupRow) -> Group {
    Group {
        title: row.title,
        slug: row.slug,
        description: row.description,
    }
}
