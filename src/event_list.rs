//! The collection of events of the user

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::event::{Event, EventId};
use crate::proximity::sorted_by_proximity;

/// Owns every event. Nothing else keeps a reference to them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.get(id).is_some()
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Replace the event that has the same ID. Returns `false` (and changes nothing) if there is none.
    pub fn update(&mut self, event: Event) -> bool {
        match self.events.iter_mut().find(|e| e.id() == event.id()) {
            None => false,
            Some(existing) => {
                *existing = event;
                true
            }
        }
    }

    pub fn remove(&mut self, id: &EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id() == id)?;
        Some(self.events.remove(index))
    }

    /// Events sorted by proximity to `now`
    pub fn sorted(&self, now: DateTime<Utc>) -> Vec<&Event> {
        sorted_by_proximity(&self.events, now)
    }

    /// Remove the events at these positions of the list sorted by proximity to `now` (i.e. the positions a user sees).
    ///
    /// Positions out of range are ignored. Returns the removed events, in sorted order.
    pub fn remove_at_sorted(&mut self, positions: &[usize], now: DateTime<Utc>) -> Vec<Event> {
        let ids: Vec<EventId> = {
            let sorted = self.sorted(now);
            let wanted: HashSet<usize> = positions.iter().copied().collect();
            sorted.iter()
                .enumerate()
                .filter(|(position, _)| wanted.contains(position))
                .map(|(_, event)| *event.id())
                .collect()
        };

        ids.iter()
            .filter_map(|id| self.remove(id))
            .collect()
    }
}
