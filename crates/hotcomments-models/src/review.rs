use serde::{Deserialize, Serialize};
use crate::rating::{self, StarRating};

/// Username used when a comment carries no resolvable author link.
pub const ANONYMOUS_USERNAME: &str = "anonymous";

/// Column order shared by every tabular export.
pub const FIELD_NAMES: [&str; 6] = ["comment_id", "username", "rating", "content", "votes", "time"];

/// One short comment taken from a movie's comment listing.
///
/// Every field is always present. Missing markup falls back to the empty
/// string, `None`, `0` or [`ANONYMOUS_USERNAME`] instead of dropping the field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentRecord {
    pub comment_id: String,
    pub username: String,
    #[serde(with = "rating::empty_as_none")]
    pub rating: Option<StarRating>,
    pub content: String,
    pub votes: u32,
    pub time: String, // Verbatim from the listing's title attribute, e.g. "2024-01-05 21:13:02"
}

impl Default for CommentRecord {
    fn default() -> Self {
        Self {
            comment_id: String::new(),
            username: ANONYMOUS_USERNAME.to_string(),
            rating: None,
            content: String::new(),
            votes: 0,
            time: String::new(),
        }
    }
}
