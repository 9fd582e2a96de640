//! # roomhub-mail
//!
//! Mail providers for RoomHub: captcha delivery and booking urge reminders.
//!
//! - **log**: writes each message to the tracing log (development default)
//! - **http**: posts each message as JSON to a mail relay endpoint
//! - **memory**: keeps an outbox in memory (tests)
//!
//! The provider is selected at runtime based on configuration.

pub mod http;
pub mod log;
pub mod memory;
pub mod provider;

pub use memory::MemoryMailer;
pub use provider::MailManager;
