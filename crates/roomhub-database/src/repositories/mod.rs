//! PostgreSQL implementations of the store traits.

pub mod booking;
pub mod meeting_room;
pub mod role;
pub mod statistic;
pub mod user;

pub use booking::BookingRepository;
pub use meeting_room::MeetingRoomRepository;
pub use role::RoleRepository;
pub use statistic::StatisticRepository;
pub use user::UserRepository;
