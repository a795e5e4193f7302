use std::sync::Arc;

use chrono::{Duration, Utc};

use event_countdown::{Countdown, EditMode, EventDraft, ReminderScheduler};
use event_countdown::notification_center::InMemoryNotificationCenter;
use event_countdown::scheduler::feedback::feedback_channel;
use event_countdown::traits::NotificationService;


#[tokio::main]
async fn main() {
    env_logger::init();

    let center = Arc::new(InMemoryNotificationCenter::new());
    let (sender, mut receiver) = feedback_channel();
    let scheduler = ReminderScheduler::new(Arc::clone(&center)).with_feedback(sender);
    let mut countdown = Countdown::new(scheduler);

    countdown.request_permission().await;

    let now = Utc::now();
    let drafts = vec![
        EventDraft::new("Team lunch", now + Duration::hours(2)),
        EventDraft::new("Dentist", now + Duration::minutes(3)),
        EventDraft::new("Release party", now - Duration::days(1)),
        EventDraft::new("Conference talk", now + Duration::weeks(3)),
    ];
    for draft in drafts {
        if let Err(err) = countdown.save(&EditMode::Add, draft).await {
            log::error!("Unable to save an event: {}", err);
        }
    }

    println!("---- Events -----");
    event_countdown::utils::print_event_list(countdown.events().as_slice(), now);

    println!("---- Reminders -----");
    while let Ok(event) = receiver.try_recv() {
        println!("    {}", event);
    }
    match center.pending_ids().await {
        Ok(ids) => println!("{} pending reminder(s): {:?}", ids.len(), ids),
        Err(err) => log::error!("Unable to list pending reminders: {}", err),
    }
}
