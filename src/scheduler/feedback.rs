//! Utilities to report the outcome of scheduler operations to a listener

use std::fmt::{Display, Error, Formatter};

use chrono::{DateTime, Utc};

use crate::event::EventId;

/// Something that happened to a reminder
#[derive(Clone, Debug, PartialEq)]
pub enum ReminderEvent {
    /// The user denied (or could not be asked for) the permission to display notifications
    PermissionDenied,
    /// The user granted the permission to display notifications
    PermissionGranted,
    /// A reminder has been accepted by the notification service
    Scheduled { event_id: EventId, fire_at: DateTime<Utc> },
    /// A reminder has been cancelled (or there was nothing to cancel)
    Cancelled { event_id: EventId },
    /// The notification service rejected a reminder
    Failed { event_id: EventId, reason: String },
}

impl Display for ReminderEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            ReminderEvent::PermissionDenied => write!(f, "Notifications are not allowed"),
            ReminderEvent::PermissionGranted => write!(f, "Notifications are allowed"),
            ReminderEvent::Scheduled{event_id, fire_at} => write!(f, "[{}] reminder scheduled for {}", event_id, fire_at),
            ReminderEvent::Cancelled{event_id} => write!(f, "[{}] reminder cancelled", event_id),
            ReminderEvent::Failed{event_id, reason} => write!(f, "[{}] unable to schedule a reminder: {}", event_id, reason),
        }
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::mpsc::UnboundedSender<ReminderEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::mpsc::UnboundedReceiver<ReminderEvent>;

/// Create a feeback channel, that can be used to be notified whenever a scheduler operation completes.
///
/// Events about different event IDs may arrive in any order.
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}



/// Logs the outcome of scheduler operations, and forwards them to a listener (if any)
#[derive(Clone, Debug, Default)]
pub struct Feedback {
    channel: Option<FeedbackSender>,
}

impl Feedback {
    pub fn new() -> Self {
        Self { channel: None }
    }
    pub fn new_with_channel(channel: FeedbackSender) -> Self {
        Self { channel: Some(channel) }
    }

    /// Log and forward an event
    pub fn report(&self, event: ReminderEvent) {
        match &event {
            ReminderEvent::Failed{..} => log::error!("{}", event),
            ReminderEvent::PermissionDenied => log::warn!("{}", event),
            ReminderEvent::Scheduled{..} | ReminderEvent::PermissionGranted => log::info!("{}", event),
            ReminderEvent::Cancelled{..} => log::debug!("{}", event),
        }

        if let Some(sender) = &self.channel {
            if let Err(err) = sender.send(event) {
                log::debug!("Nobody listens to reminder feedback anymore, dropping \"{}\"", err.0);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_reach_the_listener() {
        let (sender, mut receiver) = feedback_channel();
        let feedback = Feedback::new_with_channel(sender);
        let id = EventId::random();

        feedback.report(ReminderEvent::Cancelled{ event_id: id });
        feedback.report(ReminderEvent::PermissionDenied);

        assert_eq!(receiver.try_recv().unwrap(), ReminderEvent::Cancelled{ event_id: id });
        assert_eq!(receiver.try_recv().unwrap(), ReminderEvent::PermissionDenied);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn no_listener_is_fine() {
        let feedback = Feedback::new();
        feedback.report(ReminderEvent::PermissionGranted);

        let (sender, receiver) = feedback_channel();
        drop(receiver);
        Feedback::new_with_channel(sender).report(ReminderEvent::PermissionGranted);
    }
}
