//! Ordering events by how close they are to "now"
//!
//! Upcoming events (including events happening right now) come first, soonest first.
//! Past events come next, most recent first.
//! Events on the same date are ordered by title, then by ID, so that the order is total.
//!
//! "Now" is an input, not stored data: the order must be computed again whenever time passes.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::event::Event;

/// Which side of "now" an event falls on
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Proximity {
    Upcoming,
    Past,
}

impl Proximity {
    pub fn of(date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if date >= now {
            Proximity::Upcoming
        } else {
            Proximity::Past
        }
    }
}

/// Compare two events by proximity to `now`
pub fn compare_by_proximity(left: &Event, right: &Event, now: DateTime<Utc>) -> Ordering {
    let left_side = Proximity::of(left.date(), now);
    let right_side = Proximity::of(right.date(), now);

    left_side.cmp(&right_side)
        .then_with(|| match left_side {
            Proximity::Upcoming => left.date().cmp(&right.date()),
            Proximity::Past => right.date().cmp(&left.date()),
        })
        .then_with(|| left.title().cmp(right.title()))
        .then_with(|| left.id().cmp(right.id()))
}

/// Sort events in place by proximity to `now`
pub fn sort_by_proximity(events: &mut [Event], now: DateTime<Utc>) {
    events.sort_by(|l, r| compare_by_proximity(l, r, now));
}

/// Returns the events sorted by proximity to `now`, leaving `events` untouched
pub fn sorted_by_proximity(events: &[Event], now: DateTime<Utc>) -> Vec<&Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|l, r| compare_by_proximity(l, r, now));
    sorted
}

/// Returns the upcoming events and the past events, each in proximity order
pub fn partition_by_proximity(events: &[Event], now: DateTime<Utc>) -> (Vec<&Event>, Vec<&Event>) {
    sorted_by_proximity(events, now)
        .into_iter()
        .partition(|event| event.is_upcoming(now))
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2024-05-20T10:00:00Z".parse().unwrap()
    }

    fn at(title: &str, offset_minutes: i64) -> Event {
        Event::new(title, now() + Duration::minutes(offset_minutes)).unwrap()
    }

    #[test]
    fn now_counts_as_upcoming() {
        assert_eq!(Proximity::of(now(), now()), Proximity::Upcoming);
        assert_eq!(Proximity::of(now() - Duration::milliseconds(1), now()), Proximity::Past);
    }

    #[test]
    fn upcoming_then_past() {
        let events = vec![
            at("long ago", -600),
            at("tomorrow", 1440),
            at("just now", -1),
            at("right now", 0),
            at("soon", 5),
        ];
        let titles: Vec<&str> = sorted_by_proximity(&events, now())
            .iter()
            .map(|e| e.title())
            .collect();
        assert_eq!(titles, vec!["right now", "soon", "tomorrow", "just now", "long ago"]);

        let (upcoming, past) = partition_by_proximity(&events, now());
        assert_eq!(upcoming.len(), 3);
        assert_eq!(past.len(), 2);
        assert_eq!(past[0].title(), "just now");
    }

    #[test]
    fn sort_in_place() {
        let mut events = vec![at("b", -5), at("a", 5)];
        sort_by_proximity(&mut events, now());
        assert_eq!(events[0].title(), "a");
        assert_eq!(events[1].title(), "b");
    }

    #[test]
    fn ties_break_by_title_then_id() {
        let a = at("same", 30);
        let b = at("same", 30);
        let c = at("other", 30);

        assert_eq!(compare_by_proximity(&c, &a, now()), Ordering::Less);
        assert_eq!(compare_by_proximity(&a, &a, now()), Ordering::Equal);
        assert_eq!(compare_by_proximity(&a, &b, now()), a.id().cmp(b.id()));
        assert_eq!(compare_by_proximity(&b, &a, now()), b.id().cmp(a.id()));
    }

    #[test]
    fn the_order_depends_on_now() {
        let events = vec![at("first", 10), at("second", 20)];
        let later = now() + Duration::minutes(15);
        let titles: Vec<&str> = sorted_by_proximity(&events, later).iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }
}
