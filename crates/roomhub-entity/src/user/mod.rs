//! User domain entities.

pub mod model;
pub mod query;
pub mod view;

pub use model::{CreateUser, UpdateProfile, User};
pub use query::UserQuery;
pub use view::{UserDetail, UserInfo};
