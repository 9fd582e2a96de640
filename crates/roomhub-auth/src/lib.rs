//! # roomhub-auth
//!
//! Authentication and authorization for RoomHub.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and verification
//! - `password`: Argon2id password hashing and policy enforcement
//! - `permission`: role to permission aggregation
//! - `session`: login, token issuance and refresh
//! - `guard`: per-route policies and the authorization decision

pub mod guard;
pub mod jwt;
pub mod password;
pub mod permission;
pub mod session;

pub use guard::{GuardOutcome, RouteGuard, RoutePolicy};
pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder, RefreshClaims, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{IssuedSession, LoginResult, SessionManager};
