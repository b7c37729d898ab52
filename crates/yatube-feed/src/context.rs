use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

/// The ways a feed can be scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedContext {
    AllPosts,
    ByGroup(String),
    ByAuthor(String),
    /// Posts by the authors the viewer follows.
    FollowedFeed,
}

impl FeedContext {
    /// Only the first page of the global feed goes through the page cache.
    pub fn is_cacheable(&self, page_number: usize) -> bool {
        matches!(self, Self::AllPosts) && page_number == 1
    }
}

/// Parses `all`, `group:<slug>`, `author:<username>` and `followed`.
impl FromStr for FeedContext {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "all" => Ok(Self::AllPosts),
            None if s == "followed" => Ok(Self::FollowedFeed),
            Some(("group", slug)) if !slug.is_empty() => Ok(Self::ByGroup(slug.to_string())),
            Some(("author", username)) if !username.is_empty() => {
                Ok(Self::ByAuthor(username.to_string()))
            }
            _ => Err(FeedError::validation("context", format!("unknown feed context `{s}`"))),
        }
    }
}

impl fmt::Display for FeedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllPosts => f.write_str("all"),
            Self::ByGroup(slug) => write!(f, "group:{slug}"),
            Self::ByAuthor(username) => write!(f, "author:{username}"),
            Self::FollowedFeed => f.write_str("followed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_tags() {
        assert_eq!("all".parse::<FeedContext>().unwrap(), FeedContext::AllPosts);
        assert_eq!("followed".parse::<FeedContext>().unwrap(), FeedContext::FollowedFeed);
        assert_eq!(
            "group:test-slug".parse::<FeedContext>().unwrap(),
            FeedContext::ByGroup("test-slug".into())
        );
        assert_eq!(
            "author:leo".parse::<FeedContext>().unwrap(),
            FeedContext::ByAuthor("leo".into())
        );
    }

    #[test]
    fn test_reject_unknown_context() {
        for tag in ["", "everything", "group:", "author:", "tag:rust"] {
            assert!(matches!(
                tag.parse::<FeedContext>(),
                Err(FeedError::Validation { field: "context", .. })
            ));
        }
    }

    #[test]
    fn test_display_matches_parse() {
        let ctx = FeedContext::ByGroup("test-slug".into());
        assert_eq!(ctx.to_string().parse::<FeedContext>().unwrap(), ctx);
    }

    #[test]
    fn test_only_first_global_page_is_cacheable() {
        assert!(FeedContext::AllPosts.is_cacheable(1));
        assert!(!FeedContext::AllPosts.is_cacheable(2));
        assert!(!FeedContext::FollowedFeed.is_cacheable(1));
        assert!(!FeedContext::ByGroup("g".into()).is_cacheable(1));
    }
}
