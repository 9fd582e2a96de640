//! Adapter traits defined in `roomhub-core` and implemented by other crates.

pub mod cache;
pub mod mailer;

pub use cache::CacheProvider;
pub use mailer::{MailMessage, Mailer};
