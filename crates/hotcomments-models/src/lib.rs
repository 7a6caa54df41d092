pub mod rating;
pub mod review;

pub use rating::StarRating;
pub use review::{CommentRecord, ANONYMOUS_USERNAME, FIELD_NAMES};
