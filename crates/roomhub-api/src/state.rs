//! Shared application state threaded through all handlers.

use std::sync::Arc;

use roomhub_auth::password::{PasswordHasher, PasswordValidator};
use roomhub_auth::{JwtDecoder, JwtEncoder, RouteGuard, SessionManager};
use roomhub_cache::CacheManager;
use roomhub_core::config::AppConfig;
use roomhub_core::traits::{CacheProvider, Mailer};
use roomhub_database::DatabaseManager;
use roomhub_mail::MailManager;
use roomhub_service::{
    BookingService, CaptchaService, MeetingRoomService, StatisticService, UserService,
};

/// Application state available to every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Relational stores.
    pub database: Arc<DatabaseManager>,
    /// Credential store.
    pub cache: Arc<CacheManager>,
    /// Route guard used by the auth middleware.
    pub guard: Arc<RouteGuard>,
    pub user_service: Arc<UserService>,
    pub captcha_service: Arc<CaptchaService>,
    pub booking_service: Arc<BookingService>,
    pub meeting_room_service: Arc<MeetingRoomService>,
    pub statistic_service: Arc<StatisticService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire auth and services on top of the adapters.
    pub fn new(
        config: AppConfig,
        database: DatabaseManager,
        cache: CacheManager,
        mailer: MailManager,
    ) -> Self {
        let cache = Arc::new(cache);
        let cache_provider: Arc<dyn CacheProvider> = cache.clone();
        let mailer: Arc<dyn Mailer> = Arc::new(mailer);

        // Auth
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&database.users),
            Arc::clone(&database.roles),
            Arc::clone(&password_hasher),
            jwt_encoder,
            Arc::clone(&jwt_decoder),
        ));
        let guard = Arc::new(RouteGuard::new(jwt_decoder, Arc::clone(&session_manager)));

        // Services
        let captcha_service = Arc::new(CaptchaService::new(
            Arc::clone(&cache_provider),
            Arc::clone(&mailer),
            &config.auth,
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&database.users),
            Arc::clone(&database.roles),
            Arc::clone(&cache_provider),
            Arc::clone(&captcha_service),
            session_manager,
            password_hasher,
            password_validator,
        ));
        let booking_service = Arc::new(BookingService::new(
            Arc::clone(&database.bookings),
            Arc::clone(&database.users),
            cache_provider,
            mailer,
            config.booking.clone(),
        ));
        let meeting_room_service =
            Arc::new(MeetingRoomService::new(Arc::clone(&database.meeting_rooms)));
        let statistic_service = Arc::new(StatisticService::new(Arc::clone(&database.statistics)));

        Self {
            config: Arc::new(config),
            database: Arc::new(database),
            cache,
            guard,
            user_service,
            captcha_service,
            booking_service,
            meeting_room_service,
            statistic_service,
        }
    }
}
