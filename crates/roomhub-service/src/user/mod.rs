//! Account services: registration, self-service profile, admin user
//! management and the startup admin bootstrap.

pub mod bootstrap;
pub mod service;

pub use service::{RegisterUser, UpdatePassword, UpdateUser, UserService};
