//! Keeps the events of the user and their reminders in step
//!
//! Saving an event schedules its reminder, editing it reschedules it, deleting it cancels it.
//! Reminder failures are logged (and reported to the scheduler feedback channel, if any): they never undo a change to the events.

use chrono::{DateTime, Utc};

use crate::error::CountdownError;
use crate::event::{EditMode, Event, EventDraft, EventId};
use crate::event_list::EventList;
use crate::scheduler::ReminderScheduler;
use crate::traits::NotificationService;

pub struct Countdown<S> {
    events: EventList,
    scheduler: ReminderScheduler<S>,
    minutes_before: u32,
}

impl<S> Countdown<S>
where
    S: NotificationService,
{
    /// Reminders will fire as many minutes before events as the scheduler config says
    pub fn new(scheduler: ReminderScheduler<S>) -> Self {
        let minutes_before = scheduler.config().minutes_before;
        Self {
            events: EventList::new(),
            scheduler,
            minutes_before,
        }
    }

    pub fn with_minutes_before(mut self, minutes_before: u32) -> Self {
        self.minutes_before = minutes_before;
        self
    }

    pub fn events(&self) -> &EventList {
        &self.events
    }

    pub fn scheduler(&self) -> &ReminderScheduler<S> {
        &self.scheduler
    }

    /// Events sorted by proximity to `now`
    pub fn sorted(&self, now: DateTime<Utc>) -> Vec<&Event> {
        self.events.sorted(now)
    }

    /// Ask for the notification permission. Returns whether it is granted.
    pub async fn request_permission(&self) -> bool {
        match self.scheduler.request_permission().await {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{}. Reminders will not show up", err);
                false
            }
        }
    }

    /// Save a draft, and schedule (or reschedule) the reminder of the resulting event.
    ///
    /// Fails if the draft is not valid, or if it edits an event that does not exist. In this case, nothing changes.
    pub async fn save(&mut self, mode: &EditMode, draft: EventDraft) -> Result<EventId, CountdownError> {
        let event = draft.save(mode)?;
        let id = *event.id();

        match mode {
            EditMode::Add => {
                self.events.add(event.clone());
                if let Err(err) = self.scheduler.schedule(&event, self.minutes_before).await {
                    log::warn!("Event {} is saved, but its reminder is not: {}", id, err);
                }
            },
            EditMode::Edit{ .. } => {
                if self.events.update(event.clone()) == false {
                    return Err(CountdownError::UnknownEvent(id));
                }
                if let Err(err) = self.scheduler.reschedule(&event, self.minutes_before).await {
                    log::warn!("Event {} is updated, but its reminder is not: {}", id, err);
                }
            },
        }
        Ok(id)
    }

    /// Delete an event and cancel its reminder
    pub async fn delete(&mut self, id: &EventId) -> Option<Event> {
        let removed = self.events.remove(id)?;
        self.scheduler.cancel(&removed).await;
        Some(removed)
    }

    /// Delete the events at these positions of the list sorted by proximity to `now`, and cancel their reminders
    pub async fn delete_at_sorted(&mut self, positions: &[usize], now: DateTime<Utc>) -> Vec<Event> {
        let removed = self.events.remove_at_sorted(positions, now);
        for event in &removed {
            self.scheduler.cancel(event).await;
        }
        removed
    }
}
