use notification_cell::models::{Notification, NotificationKind, NotificationStatus};

#[test]
fn confirmation_request_formats_the_prompt_message() {
    let notification =
        Notification::confirmation_request("patient@example.com", "House", "Monday", "10:00");

    assert_eq!(notification.recipient_email, "patient@example.com");
    assert_eq!(notification.kind, NotificationKind::ConfirmationRequest);
    assert_eq!(
        notification.message,
        "Please confirm your appointment with Dr. House on Monday at 10:00."
    );
    assert_eq!(notification.status, NotificationStatus::Queued);
    assert!(notification.sent_at.is_none());
    assert!(notification.error_message.is_none());
}

#[test]
fn review_prompt_formats_the_thank_you_message() {
    let notification = Notification::review_prompt("patient@example.com", "House");

    assert_eq!(notification.kind, NotificationKind::ReviewPrompt);
    assert_eq!(
        notification.message,
        "Thank you for visiting Dr. House. Please take a moment to rate your experience."
    );
}

#[test]
fn each_notification_gets_its_own_id() {
    let a = Notification::review_prompt("patient@example.com", "House");
    let b = Notification::review_prompt("patient@example.com", "House");
    assert_ne!(a.id, b.id);
}

#[test]
fn only_sent_and_failed_are_terminal() {
    assert!(!NotificationStatus::Queued.is_terminal());
    assert!(NotificationStatus::Sent.is_terminal());
    assert!(NotificationStatus::Failed.is_terminal());
}

#[test]
fn notifications_round_trip_through_json_for_queue_storage() {
    let notification =
        Notification::confirmation_request("patient@example.com", "House", "Monday", "10:00");

    let serialized = serde_json::to_string(&notification).unwrap();
    let parsed: Notification = serde_json::from_str(&serialized).unwrap();

    assert_eq!(parsed.id, notification.id);
    assert_eq!(parsed.message, notification.message);
    assert_eq!(parsed.status, NotificationStatus::Queued);
}
