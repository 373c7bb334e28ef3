pub mod booking;
pub mod conflict;
pub mod lifecycle;
pub mod reminders;
pub mod store;

pub use booking::BookingCoordinator;
pub use conflict::ConflictChecker;
pub use lifecycle::AppointmentLifecycleService;
pub use reminders::ReminderService;
pub use store::AppointmentStore;
