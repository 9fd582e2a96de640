//! Login, token issuance and refresh.

pub mod manager;

pub use manager::{IssuedSession, LoginResult, SessionManager};
