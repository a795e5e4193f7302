//! Errors reported by this crate
//!
//! None of them is fatal to the host application: they are meant to be logged (or displayed) and then dropped.

use std::fmt::{Display, Formatter};

use crate::event::EventId;

/// Boxed error returned by [`NotificationService`](crate::traits::NotificationService) implementations
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum CountdownError {
    /// The user declined notifications. Reminders may still be registered, they just won't show up.
    PermissionDenied,
    /// The notification service rejected a reminder
    SchedulingFailed { event_id: EventId, reason: String },
    /// A draft could not be turned into an event (e.g. its title is blank)
    InvalidEvent(String),
    /// No event with this ID is known
    UnknownEvent(EventId),
}

impl Display for CountdownError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CountdownError::PermissionDenied => write!(f, "Notification permission was denied"),
            CountdownError::SchedulingFailed { event_id, reason } => {
                write!(f, "Unable to schedule a reminder for event {}: {}", event_id, reason)
            },
            CountdownError::InvalidEvent(reason) => write!(f, "Invalid event: {}", reason),
            CountdownError::UnknownEvent(id) => write!(f, "No event with ID {}", id),
        }
    }
}

impl std::error::Error for CountdownError {}
