//! Reminders: when they fire, and what they say

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use bitflags::bitflags;

use crate::config::NOTIFICATION_TITLE;
use crate::event::{Event, EventId};

bitflags! {
    /// What a notification is allowed to do, as requested to the notification service
    #[derive(Serialize, Deserialize)]
    pub struct NotificationOptions: u8 {
        /// Display an alert
        const ALERT = 1;
        /// Play a sound
        const SOUND = 2;
        /// Update the app badge
        const BADGE = 4;
    }
}

impl Default for NotificationOptions {
    fn default() -> Self {
        NotificationOptions::all()
    }
}


/// Compute the instant a reminder should fire at.
///
/// This is `minutes_before` minutes before `date`, unless this instant is not strictly after `now`.
/// In this case, the reminder fires `fallback` after `now`, so that imminent (or already started) events still get one.
pub fn fire_time(date: DateTime<Utc>, minutes_before: u32, now: DateTime<Utc>, fallback: Duration) -> DateTime<Utc> {
    // Out of the representable range counts as "already passed"
    match date.checked_sub_signed(Duration::minutes(i64::from(minutes_before))) {
        Some(candidate) if candidate > now => candidate,
        _ => now.checked_add_signed(fallback).unwrap_or(now),
    }
}


/// The human-readable part of a reminder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

impl ReminderContent {
    pub fn for_event(event: &Event, minutes_before: u32) -> Self {
        let title = NOTIFICATION_TITLE.lock()
            .map(|t| t.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
        let unit = if minutes_before == 1 { "minute" } else { "minutes" };
        Self {
            title,
            body: format!("{} starts in {} {}.", event.title(), minutes_before, unit),
        }
    }
}


/// A reminder that has been handed to the notification service
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    event_id: EventId,
    fire_at: DateTime<Utc>,
    content: ReminderContent,
}

impl ScheduledReminder {
    pub fn new(event_id: EventId, fire_at: DateTime<Utc>, content: ReminderContent) -> Self {
        Self { event_id, fire_at, content }
    }

    pub fn event_id(&self) -> &EventId          { &self.event_id }
    pub fn fire_at(&self) -> DateTime<Utc>      { self.fire_at   }
    pub fn content(&self) -> &ReminderContent   { &self.content  }

    /// The request to send to a [`NotificationService`](crate::traits::NotificationService)
    pub fn to_request(&self) -> NotificationRequest {
        NotificationRequest {
            id: self.event_id.to_string(),
            fire_at: self.fire_at,
            title: self.content.title.clone(),
            body: self.content.body.clone(),
        }
    }
}


/// A pending notification, as the notification service knows it.
///
/// `id` is the string form of the [`EventId`] this notification is about. There is at most one pending request per `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub id: String,
    pub fire_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
}


#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn fires_before_the_event() {
        let fire = fire_time(t() + Duration::minutes(10), 5, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::minutes(5));
    }

    #[test]
    fn falls_back_when_the_offset_has_passed() {
        // candidate is T-3min
        let fire = fire_time(t() + Duration::minutes(2), 5, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::seconds(1));

        // candidate is exactly now: not strictly after, so it falls back as well
        let fire = fire_time(t() + Duration::minutes(5), 5, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::seconds(1));

        // already started
        let fire = fire_time(t() - Duration::hours(1), 0, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::seconds(1));
    }

    #[test]
    fn dates_at_the_edge_of_time_do_not_overflow() {
        let earliest = DateTime::<Utc>::MIN_UTC + Duration::minutes(1);
        let fire = fire_time(earliest, 5, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::seconds(1));

        let latest = DateTime::<Utc>::MAX_UTC;
        let fire = fire_time(latest - Duration::minutes(1), 5, latest, Duration::seconds(1));
        assert_eq!(fire, latest);
    }

    #[test]
    fn zero_offset_fires_at_the_event() {
        let fire = fire_time(t() + Duration::hours(3), 0, t(), Duration::seconds(1));
        assert_eq!(fire, t() + Duration::hours(3));
    }

    #[test]
    fn content_and_request() {
        let event = Event::new("Standup", t()).unwrap();
        let content = ReminderContent::for_event(&event, 5);
        assert_eq!(content.body, "Standup starts in 5 minutes.");
        assert_eq!(ReminderContent::for_event(&event, 1).body, "Standup starts in 1 minute.");

        let reminder = ScheduledReminder::new(*event.id(), t(), content.clone());
        let request = reminder.to_request();
        assert_eq!(request.id, event.id().to_string());
        assert_eq!(request.fire_at, t());
        assert_eq!(request.title, content.title);
    }

    #[test]
    fn all_options_by_default() {
        let options = NotificationOptions::default();
        assert!(options.contains(NotificationOptions::ALERT | NotificationOptions::SOUND | NotificationOptions::BADGE));
    }
}
