//! newsdesk-core: pieces shared by the server and the CLI
//!
//! - [`slug`]: title to URL slug derivation
//! - [`settings`]: environment-driven configuration
//! - [`error`]: structured error type for the above

pub mod error;
pub mod settings;
pub mod slug;

pub use error::{CoreError, Result};
pub use settings::{ProviderKeys, Settings};
pub use slug::slugify;
