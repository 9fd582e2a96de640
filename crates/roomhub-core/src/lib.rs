//! # roomhub-core
//!
//! Core crate for RoomHub. Contains configuration schemas, the unified error
//! system, pagination and time-range types, and the adapter traits that the
//! cache and mail crates implement.
//!
//! This crate has **no** internal dependencies on other RoomHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
