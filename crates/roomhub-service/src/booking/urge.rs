//! Throttled reminders to the admin about pending bookings.

use std::time::Duration;

use tracing::{error, info};

use roomhub_cache::keys;
use roomhub_core::error::AppError;
use roomhub_core::traits::MailMessage;

use super::service::BookingService;

impl BookingService {
    /// Ask the admin to review booking `id`, at most once per urge interval.
    ///
    /// The throttle flag is claimed atomically, so concurrent urges send a
    /// single reminder. Delivery failures are logged and not reported.
    pub async fn urge(&self, id: i64) -> Result<String, AppError> {
        let interval = self.config.urge_interval_minutes;
        let flag = keys::booking_urge(id);

        let claimed = self
            .cache
            .set_nx(&flag, "1", Duration::from_secs(interval * 60))
            .await?;
        if !claimed {
            info!(booking_id = id, "Urge throttled");
            return Ok(format!("you can only urge once every {interval} minutes"));
        }

        let email = match self.admin_email().await {
            Ok(email) => email,
            Err(e) => {
                // Nobody was notified, so the next attempt must not be throttled.
                self.cache.delete(&flag).await?;
                return Err(e);
            }
        };

        let message = MailMessage::new(
            &email,
            "booking urge reminder",
            format!("<p>Booking {id} is waiting for approval.</p>"),
        );
        if let Err(e) = self.mailer.send(&message).await {
            error!(booking_id = id, error = %e, "Failed to send urge reminder");
        } else {
            info!(booking_id = id, to = %email, "Urge reminder sent");
        }

        Ok("urge sent".to_string())
    }

    /// Address of the admin, cached without expiry after the first lookup.
    async fn admin_email(&self) -> Result<String, AppError> {
        let key = keys::admin_email();
        if let Some(email) = self.cache.get(&key).await? {
            return Ok(email);
        }

        let admin = self
            .users
            .find_first_admin()
            .await?
            .ok_or_else(|| AppError::validation("no admin account to notify"))?;

        self.cache.set_persistent(&key, &admin.email).await?;
        Ok(admin.email)
    }
}
