//! Hermetic service wiring over the in-memory adapters.

use std::sync::Arc;

use chrono::Duration;

use roomhub_auth::password::{PasswordHasher, PasswordValidator};
use roomhub_auth::{JwtDecoder, JwtEncoder, SessionManager};
use roomhub_cache::memory::MemoryCacheProvider;
use roomhub_core::config::AppConfig;
use roomhub_database::MemoryStore;
use roomhub_database::store::{BookingStore, MeetingRoomStore, UserStore};
use roomhub_entity::booking::Booking;
use roomhub_entity::meeting_room::{CreateMeetingRoom, MeetingRoom};
use roomhub_entity::user::{CreateUser, User};
use roomhub_mail::MemoryMailer;

use crate::{
    BookingService, CaptchaService, MeetingRoomService, RequestContext, StatisticService,
    UserService,
};

const SECRET: &str = "service-test-secret";

pub(crate) struct Harness {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCacheProvider>,
    pub mailer: Arc<MemoryMailer>,
    pub captchas: Arc<CaptchaService>,
    pub users: UserService,
    pub bookings: BookingService,
    pub rooms: MeetingRoomService,
    pub statistics: StatisticService,
}

impl Harness {
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemoryCacheProvider::new(&config.cache.memory));
        let mailer = Arc::new(MemoryMailer::new());
        let hasher = Arc::new(PasswordHasher::new());

        let decoder = Arc::new(JwtDecoder::from_secret(SECRET));
        let encoder = Arc::new(JwtEncoder::with_ttls(
            SECRET,
            Duration::minutes(30),
            Duration::days(7),
        ));
        let sessions = Arc::new(SessionManager::new(
            store.clone(),
            store.clone(),
            hasher.clone(),
            encoder,
            decoder,
        ));
        let captchas = Arc::new(CaptchaService::new(
            cache.clone(),
            mailer.clone(),
            &config.auth,
        ));

        let users = UserService::new(
            store.clone(),
            store.clone(),
            cache.clone(),
            captchas.clone(),
            sessions,
            hasher,
            Arc::new(PasswordValidator::new(&config.auth)),
        );
        let bookings = BookingService::new(
            store.clone(),
            store.clone(),
            cache.clone(),
            mailer.clone(),
            config.booking.clone(),
        );

        Self {
            rooms: MeetingRoomService::new(store.clone()),
            statistics: StatisticService::new(store.clone()),
            store,
            cache,
            mailer,
            captchas,
            users,
            bookings,
        }
    }

    /// Store a user whose password is `secret` and email `{username}@example.com`.
    pub async fn create_user(&self, username: &str, is_admin: bool) -> User {
        let password_hash = PasswordHasher::new()
            .hash_password("secret")
            .expect("hash");
        UserStore::create(
            &*self.store,
            &CreateUser {
                username: username.to_string(),
                password_hash,
                nick_name: username.to_string(),
                email: format!("{username}@example.com"),
                is_admin,
            },
        )
        .await
        .expect("create user")
    }

    pub async fn create_room(&self, name: &str) -> MeetingRoom {
        MeetingRoomStore::create(&*self.store, &room_data(name))
            .await
            .expect("create room")
    }

    pub async fn store_booking(&self, id: i64) -> Option<Booking> {
        BookingStore::find_by_id(&*self.store, id)
            .await
            .expect("find booking")
    }

    /// Context as produced by the guard for `user`.
    pub fn context(&self, user: &User) -> RequestContext {
        let info = roomhub_entity::user::UserInfo::new(user, Vec::new(), Vec::new());
        let claims = JwtEncoder::with_ttls(SECRET, Duration::minutes(30), Duration::days(7))
            .access_claims(&info);
        RequestContext::from(&claims)
    }
}

pub(crate) fn room_data(name: &str) -> CreateMeetingRoom {
    CreateMeetingRoom {
        name: name.to_string(),
        capacity: 10,
        location: "3F".to_string(),
        equipment: "projector".to_string(),
        description: "quiet".to_string(),
    }
}
