//! Route protection: per-route policies and the authorization decision.

pub mod policy;
pub mod route_guard;

pub use policy::RoutePolicy;
pub use route_guard::{GuardOutcome, RouteGuard};
