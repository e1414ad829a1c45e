use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource kinds this service stores and serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Tweets,
    Users,
    Likes,
    Videos,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Tweets,
        ResourceKind::Users,
        ResourceKind::Likes,
        ResourceKind::Videos,
    ];

    /// The URL path segment for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Tweets => "tweets",
            ResourceKind::Users => "users",
            ResourceKind::Likes => "likes",
            ResourceKind::Videos => "videos",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.path() == path)
    }

    /// The relation nested into this kind's responses, if it has one.
    pub fn relation(&self) -> Option<&'static Relation> {
        match self {
            ResourceKind::Tweets => Some(&TWEET_LIKES),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A named, one-directional cross-reference from a parent resource kind
/// to child records in another collection. Not stored anywhere; resolved
/// on demand by a foreign-key scan of the child collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub child: ResourceKind,
    pub foreign_key: &'static str,
}

pub static TWEET_LIKES: Relation = Relation {
    name: "likes",
    child: ResourceKind::Likes,
    foreign_key: "tweet_id",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_path(kind.path()), Some(kind));
        }
        assert_eq!(ResourceKind::from_path("bikes"), None);
    }

    #[test]
    fn test_only_tweets_carry_a_relation() {
        assert_eq!(ResourceKind::Tweets.relation(), Some(&TWEET_LIKES));
        assert_eq!(ResourceKind::Users.relation(), None);
        assert_eq!(ResourceKind::Likes.relation(), None);
        assert_eq!(ResourceKind::Videos.relation(), None);
    }
}
