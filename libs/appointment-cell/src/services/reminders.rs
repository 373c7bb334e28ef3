// libs/appointment-cell/src/services/reminders.rs
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use notification_cell::services::producer::NotificationProducerService;

use crate::services::store::AppointmentStore;

/// Periodic sweep over unconfirmed holds, re-publishing confirmation
/// prompts. The sweep is an ordinary pull-based operation; only the binary
/// puts it on a timer.
pub struct ReminderService {
    store: Arc<AppointmentStore>,
    producer: Arc<NotificationProducerService>,
}

impl ReminderService {
    pub fn new(store: Arc<AppointmentStore>, producer: Arc<NotificationProducerService>) -> Self {
        Self { store, producer }
    }

    /// Publish one confirmation prompt per unconfirmed hold. A failed
    /// publish skips that hold and continues; returns how many were queued.
    pub async fn send_daily_reminders(&self) -> u32 {
        let holds = self.store.not_confirmed().await;
        let mut sent = 0;

        for appointment in holds {
            let result = self
                .producer
                .publish_confirmation_request(
                    &appointment.patient_email,
                    &appointment.doctor_name,
                    &appointment.day.to_string(),
                    &appointment.hour.to_string(),
                )
                .await;

            match result {
                Ok(_) => sent += 1,
                Err(e) => warn!(
                    "Failed to queue reminder for appointment {}: {}",
                    appointment.id, e
                ),
            }
        }

        info!("Daily reminders queued for {} unconfirmed holds", sent);
        sent
    }

    pub async fn run(self, interval_hours: u64) {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(interval_hours.max(1) * 3600));

        loop {
            ticker.tick().await;
            self.send_daily_reminders().await;
        }
    }
}
