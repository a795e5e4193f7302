//! Dated events, and the drafts they are edited from

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use csscolorparser::Color;
use uuid::Uuid;

use crate::error::CountdownError;

/// How many images can be attached to a single event
pub const MAX_IMAGES: usize = 5;

/// The color an event is displayed with when the user did not pick any
pub fn default_color() -> Color {
    Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
}


/// A stable identifier for an event. It does not change when the event is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId {
    content: Uuid,
}

impl EventId {
    /// Generate a random EventId
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}

impl From<Uuid> for EventId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u = Uuid::parse_str(s)?;
        Ok(Self::from(u))
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}


/// An image attached to an event. This crate does not decode it, it only carries its bytes around.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventImage {
    data: Vec<u8>,
}

impl EventImage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}


/// A user-defined event, with a title and a target date
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    /// Never blank, and trimmed
    title: String,
    date: DateTime<Utc>,
    /// Cosmetic only
    color: Color,
    /// Cosmetic only. At most [`MAX_IMAGES`] of them
    images: Vec<EventImage>,
}

impl Event {
    /// Create a brand new event, with a new (random) ID and the default color.
    pub fn new(title: &str, date: DateTime<Utc>) -> Result<Self, CountdownError> {
        EventDraft::new(title, date).save(&EditMode::Add)
    }

    pub fn id(&self) -> &EventId          { &self.id     }
    pub fn title(&self) -> &str           { &self.title  }
    pub fn date(&self) -> DateTime<Utc>   { self.date    }
    pub fn color(&self) -> &Color         { &self.color  }
    pub fn images(&self) -> &[EventImage] { &self.images }

    /// Whether this event is still to come at `now` (an event happening right at `now` is upcoming)
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date >= now
    }
}


/// Whether a draft creates a new event or replaces an existing one
#[derive(Clone, Debug, PartialEq)]
pub enum EditMode {
    Add,
    /// Edit the event with this ID. Its current title is kept for display purposes
    Edit { id: EventId, title: String },
}

impl EditMode {
    pub fn edit(event: &Event) -> Self {
        EditMode::Edit { id: *event.id(), title: event.title().to_string() }
    }

    /// A title suited to a form editing in this mode
    pub fn title(&self) -> String {
        match self {
            EditMode::Add => "Add Event".to_string(),
            EditMode::Edit { title, .. } => format!("Edit {}", title),
        }
    }
}


/// The editable state of an event, before it is validated and saved.
///
/// Nothing here is checked until [`EventDraft::save`] is called.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: DateTime<Utc>,
    pub color: Color,
    pub images: Vec<EventImage>,
}

impl EventDraft {
    pub fn new(title: &str, date: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            date,
            color: default_color(),
            images: Vec::new(),
        }
    }

    /// An empty draft, dated `now`
    pub fn for_new(now: DateTime<Utc>) -> Self {
        Self::new("", now)
    }

    /// A draft pre-filled with the content of an existing event
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date,
            color: event.color.clone(),
            images: event.images.clone(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Append images after the existing ones. Images beyond [`MAX_IMAGES`] are dropped.
    pub fn add_images<I: IntoIterator<Item = EventImage>>(&mut self, images: I) {
        self.images.extend(images);
        self.images.truncate(MAX_IMAGES);
    }

    /// Remove the image at `index`, if any
    pub fn remove_image(&mut self, index: usize) -> Option<EventImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    /// Whether [`Self::save`] would accept this draft
    pub fn is_valid(&self) -> bool {
        self.title.trim().is_empty() == false
    }

    /// Turn this draft into an event.
    ///
    /// In [`EditMode::Add`] the event gets a fresh ID, in [`EditMode::Edit`] it keeps the edited event's ID.
    pub fn save(self, mode: &EditMode) -> Result<Event, CountdownError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CountdownError::InvalidEvent("the title must not be blank".to_string()));
        }

        let id = match mode {
            EditMode::Add => EventId::random(),
            EditMode::Edit { id, .. } => *id,
        };

        let mut images = self.images;
        images.truncate(MAX_IMAGES);

        Ok(Event {
            id,
            title: title.to_string(),
            date: self.date,
            color: self.color,
            images,
        })
    }
}
