//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod post;
pub mod email;
pub mod generation;
pub mod search;

pub use validation::ValidationError;
pub use post::{NewPost, PostChanges, PostContent, PostTitle};
pub use email::EmailAddress;
pub use generation::{split_article, Provider, Topic};
pub use search::{SearchLimit, SearchQuery};
