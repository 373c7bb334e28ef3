use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_email: String,
    pub message: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ConfirmationRequest,
    ReviewPrompt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Queued,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NotificationStatus::Sent | NotificationStatus::Failed)
    }
}

impl Notification {
    fn new(recipient_email: &str, message: String, kind: NotificationKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            recipient_email: recipient_email.to_string(),
            message,
            kind,
            status: NotificationStatus::Queued,
            created_at: now,
            updated_at: now,
            sent_at: None,
            error_message: None,
        }
    }

    /// Prompt asking a patient to confirm a tentative hold.
    pub fn confirmation_request(
        recipient_email: &str,
        doctor_name: &str,
        day: &str,
        hour: &str,
    ) -> Self {
        let message = format!(
            "Please confirm your appointment with Dr. {} on {} at {}.",
            doctor_name, day, hour
        );
        Self::new(recipient_email, message, NotificationKind::ConfirmationRequest)
    }

    /// Prompt sent after a completed visit, inviting a review.
    pub fn review_prompt(recipient_email: &str, doctor_name: &str) -> Self {
        let message = format!(
            "Thank you for visiting Dr. {}. Please take a moment to rate your experience.",
            doctor_name
        );
        Self::new(recipient_email, message, NotificationKind::ReviewPrompt)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: u64,
    pub processing: u64,
}
