//! # roomhub-database
//!
//! Relational storage for RoomHub. Services depend on the store traits in
//! [`store`]; [`DatabaseManager`] wires either the PostgreSQL repositories
//! or the in-memory store behind them depending on configuration.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use store::{
    BookingOutcome, BookingStore, MeetingRoomStore, RoleStore, StatisticStore, UserStore,
};
