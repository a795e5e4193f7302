//! This module turns events into reminders, and hands them to a [`NotificationService`]
//!
//! The scheduler holds no event: it only remembers the ID, title and date of an event for the duration of a call.
//! Operations on the same event ID are serialized, so that a cancel-then-reschedule cannot interleave with another
//! operation on that ID. Operations on different IDs run concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::task::JoinHandle;

use crate::config::ReminderConfig;
use crate::error::CountdownError;
use crate::event::{Event, EventId};
use crate::reminder::{fire_time, ReminderContent, ScheduledReminder};
use crate::traits::NotificationService;

pub mod feedback;
use feedback::{Feedback, FeedbackSender, ReminderEvent};

type IdLocks = Mutex<HashMap<EventId, Arc<AsyncMutex<()>>>>;

/// Holds exclusive access to an event ID until dropped
struct IdLock<'a> {
    locks: &'a IdLocks,
    id: EventId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<'a> Drop for IdLock<'a> {
    fn drop(&mut self) {
        // Release the ID first, then forget its mutex if nobody is waiting for it
        self.guard.take();
        let mut locks = lock_ids(self.locks);
        let unused = locks.get(&self.id)
            .map(|mutex| Arc::strong_count(mutex) == 1)
            .unwrap_or(false);
        if unused {
            locks.remove(&self.id);
            log::trace!("No more pending operation for event {}", self.id);
        }
    }
}

fn lock_ids(locks: &IdLocks) -> MutexGuard<'_, HashMap<EventId, Arc<AsyncMutex<()>>>> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}


/// Schedules and cancels event reminders through a [`NotificationService`]
pub struct ReminderScheduler<S> {
    service: Arc<S>,
    config: ReminderConfig,
    feedback: Feedback,
    /// The answer to the last permission request, if any
    permission: Mutex<Option<bool>>,
    locks: IdLocks,
}

impl<S> ReminderScheduler<S>
where
    S: NotificationService,
{
    /// Create a scheduler with the default [`ReminderConfig`]
    pub fn new(service: Arc<S>) -> Self {
        Self::with_config(service, ReminderConfig::default())
    }

    pub fn with_config(service: Arc<S>, config: ReminderConfig) -> Self {
        Self {
            service,
            config,
            feedback: Feedback::new(),
            permission: Mutex::new(None),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Report the outcome of every operation to this channel (see [`feedback::feedback_channel`])
    pub fn with_feedback(mut self, sender: FeedbackSender) -> Self {
        self.feedback = Feedback::new_with_channel(sender);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    /// Whether notifications are allowed, or `None` if this has not been asked yet
    pub fn permission(&self) -> Option<bool> {
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How many event IDs currently have an operation running or waiting
    pub fn in_flight(&self) -> usize {
        lock_ids(&self.locks).len()
    }

    /// Ask the user whether notifications are allowed.
    ///
    /// A denial (or a failure to ask) is returned as [`CountdownError::PermissionDenied`], but does not prevent further scheduling.
    pub async fn request_permission(&self) -> Result<(), CountdownError> {
        let granted = match self.service.request_permission(self.config.permission_options).await {
            Ok(granted) => granted,
            Err(err) => {
                log::warn!("Unable to request the notification permission: {}", err);
                false
            },
        };
        *self.permission.lock().unwrap_or_else(PoisonError::into_inner) = Some(granted);

        if granted {
            self.feedback.report(ReminderEvent::PermissionGranted);
            Ok(())
        } else {
            self.feedback.report(ReminderEvent::PermissionDenied);
            Err(CountdownError::PermissionDenied)
        }
    }

    /// Compute the reminder for an event, without registering it
    pub fn plan(&self, event: &Event, minutes_before: u32, now: DateTime<Utc>) -> ScheduledReminder {
        let fire_at = fire_time(event.date(), minutes_before, now, self.config.fallback_delay());
        ScheduledReminder::new(*event.id(), fire_at, ReminderContent::for_event(event, minutes_before))
    }

    /// Register a reminder `minutes_before` minutes before `event`, or very soon in case this is already too late.
    ///
    /// If a reminder for this event is already pending, the caller must [`cancel`](Self::cancel) it first, or use [`reschedule`](Self::reschedule).
    pub async fn schedule(&self, event: &Event, minutes_before: u32) -> Result<ScheduledReminder, CountdownError> {
        self.run_schedule(event, minutes_before, None, false).await
    }

    /// Same as [`Self::schedule`], with an explicit "now"
    pub async fn schedule_at(&self, event: &Event, minutes_before: u32, now: DateTime<Utc>) -> Result<ScheduledReminder, CountdownError> {
        self.run_schedule(event, minutes_before, Some(now), false).await
    }

    /// Cancel the pending reminder of this event (if any), then schedule a new one.
    ///
    /// No other operation on this event can run in between, so this always leaves exactly one reminder registered (unless registration fails).
    pub async fn reschedule(&self, event: &Event, minutes_before: u32) -> Result<ScheduledReminder, CountdownError> {
        self.run_schedule(event, minutes_before, None, true).await
    }

    /// Same as [`Self::reschedule`], with an explicit "now"
    pub async fn reschedule_at(&self, event: &Event, minutes_before: u32, now: DateTime<Utc>) -> Result<ScheduledReminder, CountdownError> {
        self.run_schedule(event, minutes_before, Some(now), true).await
    }

    /// Remove the pending reminder of this event. Nothing happens if there is none.
    pub async fn cancel(&self, event: &Event) {
        self.cancel_id(event.id()).await
    }

    /// Remove the pending reminder of the event with this ID. Nothing happens if there is none.
    pub async fn cancel_id(&self, id: &EventId) {
        let _lock = self.acquire(*id).await;
        self.unregister(id).await;
    }

    async fn run_schedule(&self, event: &Event, minutes_before: u32, now: Option<DateTime<Utc>>, cancel_first: bool) -> Result<ScheduledReminder, CountdownError> {
        let _lock = self.acquire(*event.id()).await;
        if cancel_first {
            self.unregister(event.id()).await;
        }

        // "now" is only read once the ID is ours, waiting for it may have taken a while
        let now = now.unwrap_or_else(Utc::now);
        let reminder = self.plan(event, minutes_before, now);
        self.register(&reminder).await?;
        Ok(reminder)
    }

    async fn register(&self, reminder: &ScheduledReminder) -> Result<(), CountdownError> {
        let event_id = *reminder.event_id();
        if self.permission() == Some(false) {
            log::warn!("Notifications are not allowed, the reminder for event {} will probably never show up", event_id);
        }
        log::info!("Scheduling a reminder for event {} at {}", event_id, reminder.fire_at());

        match self.service.register(reminder.to_request()).await {
            Err(err) => {
                let reason = err.to_string();
                self.feedback.report(ReminderEvent::Failed{ event_id, reason: reason.clone() });
                Err(CountdownError::SchedulingFailed{ event_id, reason })
            },
            Ok(()) => {
                self.feedback.report(ReminderEvent::Scheduled{ event_id, fire_at: reminder.fire_at() });
                self.log_pending_ids().await;
                Ok(())
            }
        }
    }

    async fn unregister(&self, id: &EventId) {
        self.service.cancel(&id.to_string()).await;
        self.feedback.report(ReminderEvent::Cancelled{ event_id: *id });
    }

    async fn log_pending_ids(&self) {
        if log::log_enabled!(log::Level::Debug) == false {
            return;
        }
        match self.service.pending_ids().await {
            Ok(ids) => log::debug!("Pending reminders: {:?}", ids),
            Err(err) => log::debug!("Unable to list pending reminders: {}", err),
        }
    }

    async fn acquire(&self, id: EventId) -> IdLock<'_> {
        let mutex = self.id_mutex(id);
        let guard = mutex.lock_owned().await;
        IdLock { locks: &self.locks, id, guard: Some(guard) }
    }

    fn id_mutex(&self, id: EventId) -> Arc<AsyncMutex<()>> {
        let mut locks = lock_ids(&self.locks);
        Arc::clone(locks.entry(id).or_insert_with(|| Arc::new(AsyncMutex::new(()))))
    }
}

impl<S> ReminderScheduler<S>
where
    S: NotificationService + 'static,
{
    /// Run [`Self::schedule`] in the background. The caller is not blocked, the outcome is in the returned handle (and in the feedback channel, if any).
    pub fn spawn_schedule(self: &Arc<Self>, event: &Event, minutes_before: u32) -> JoinHandle<Result<ScheduledReminder, CountdownError>> {
        let scheduler = Arc::clone(self);
        let event = event.clone();
        tokio::spawn(async move {
            scheduler.schedule(&event, minutes_before).await
        })
    }

    /// Run [`Self::reschedule`] in the background
    pub fn spawn_reschedule(self: &Arc<Self>, event: &Event, minutes_before: u32) -> JoinHandle<Result<ScheduledReminder, CountdownError>> {
        let scheduler = Arc::clone(self);
        let event = event.clone();
        tokio::spawn(async move {
            scheduler.reschedule(&event, minutes_before).await
        })
    }

    /// Run [`Self::cancel`] in the background
    pub fn spawn_cancel(self: &Arc<Self>, event: &Event) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        let id = *event.id();
        tokio::spawn(async move {
            scheduler.cancel_id(&id).await
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::notification_center::{CenterCall, InMemoryNotificationCenter};

    fn t() -> DateTime<Utc> {
        "2030-01-01T08:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn locks_are_released() {
        let scheduler = ReminderScheduler::new(Arc::new(InMemoryNotificationCenter::new()));
        let event = Event::new("Meeting", t() + Duration::hours(1)).unwrap();

        scheduler.schedule_at(&event, 5, t()).await.unwrap();
        scheduler.reschedule_at(&event, 10, t()).await.unwrap();
        scheduler.cancel(&event).await;
        assert_eq!(scheduler.in_flight(), 0);
        assert_eq!(scheduler.service().pending_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_reschedules_keep_a_single_reminder() {
        let center = Arc::new(InMemoryNotificationCenter::new());
        let scheduler = Arc::new(ReminderScheduler::new(Arc::clone(&center)));
        let event = Event::new("Flight", Utc::now() + Duration::days(1)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| scheduler.spawn_reschedule(&event, i))
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(center.pending_count(), 1);
        assert_eq!(scheduler.in_flight(), 0);

        // Every registration directly follows the cancellation of the same reschedule
        let calls = center.calls();
        assert_eq!(calls.len(), 16);
        for pair in calls.chunks(2) {
            assert_eq!(pair[0], CenterCall::Cancel(event.id().to_string()));
            assert_eq!(pair[1], CenterCall::Register(event.id().to_string()));
        }
    }
}
