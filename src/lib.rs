//! This crate keeps track of dated events, and reminds the user about them before they happen.
//!
//! Events are ordered by their proximity to "now" in the [`proximity`] module: upcoming events first, soonest first, then past events, most recent first.
//!
//! Reminders are computed and registered by a [`ReminderScheduler`](scheduler::ReminderScheduler), that talks to a notification service through the [`NotificationService`](traits::NotificationService) trait. \
//! This crate does not display notifications itself. It provides an [`InMemoryNotificationCenter`](notification_center::InMemoryNotificationCenter) that can be used in tests. \
//! A [`Countdown`](countdown::Countdown) ties the events of the user and their reminders together.

pub mod traits;

mod event;
pub use event::{Event, EventId, EventDraft, EventImage, EditMode, MAX_IMAGES};
pub mod error;
pub use error::CountdownError;
pub mod reminder;
pub use reminder::ScheduledReminder;

pub mod proximity;
pub mod event_list;
pub use event_list::EventList;
pub mod scheduler;
pub use scheduler::ReminderScheduler;
pub mod countdown;
pub use countdown::Countdown;

pub mod notification_center;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
