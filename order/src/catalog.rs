//! Read-only event catalog.
//!
//! Loaded once at start-up from JSON (a file, or the bands bundled with the
//! crate) and never mutated afterwards. Loading is where raw records are
//! normalised: HTML description blurbs become plain text, date strings become
//! calendar dates, and duplicate ids are rejected.

use crate::types::{Event, EventId, Money, TicketType, TicketTypeKey};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

const BUILTIN_BANDS: &str = include_str!("../catalog/bands.json");

/// Catalog loading error
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog contains no events
    #[error("Catalog contains no events")]
    Empty,

    /// Two events share an id
    #[error("Duplicate event id: {0}")]
    DuplicateEventId(EventId),

    /// Two ticket types of one event share a key
    #[error("Event {event_id} lists ticket type '{ticket_type}' more than once")]
    DuplicateTicketType {
        /// Event with the duplicate
        event_id: EventId,
        /// Repeated key
        ticket_type: TicketTypeKey,
    },

    /// Event date is neither `YYYY-MM-DD` nor RFC 3339
    #[error("Event {event_id} has an invalid date '{raw}'")]
    InvalidDate {
        /// Event with the bad date
        event_id: EventId,
        /// Date text from the file
        raw: String,
    },
}

/// Catalog result
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Event record as written in catalog files
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: EventId,
    name: String,
    date: String,
    location: String,
    #[serde(default)]
    img_url: String,
    #[serde(default, alias = "description_blurb")]
    description: String,
    #[serde(default)]
    ticket_types: Vec<RawTicketType>,
}

#[derive(Debug, Deserialize)]
struct RawTicketType {
    #[serde(rename = "type")]
    key: TicketTypeKey,
    name: String,
    #[serde(default)]
    description: String,
    cost: u64,
}

impl RawEvent {
    fn into_event(self) -> Result<Event> {
        let date = parse_date(&self.date).ok_or_else(|| CatalogError::InvalidDate {
            event_id: self.id.clone(),
            raw: self.date.clone(),
        })?;

        let mut seen = HashSet::new();
        let mut ticket_types = Vec::with_capacity(self.ticket_types.len());
        for raw in self.ticket_types {
            if !seen.insert(raw.key.clone()) {
                return Err(CatalogError::DuplicateTicketType {
                    event_id: self.id,
                    ticket_type: raw.key,
                });
            }
            ticket_types.push(TicketType {
                key: raw.key,
                name: raw.name,
                description: plain_text(&raw.description),
                cost: Money::from_cents(raw.cost),
            });
        }

        Ok(Event {
            id: self.id,
            name: self.name,
            date,
            location: self.location,
            img_url: self.img_url,
            description: plain_text(&self.description),
            ticket_types,
        })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Converts an HTML blurb to plain text
///
/// Tags are dropped, paragraph and line breaks become newlines, named and
/// numeric entities are decoded and blank lines are removed. A `<` that does
/// not open a tag (`5 < 12`) is kept as text.
#[must_use]
pub fn plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        let opens_tag = rest[start + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        let close = rest[start..].find('>').filter(|_| opens_tag);

        let Some(len) = close else {
            text.push_str(&rest[..=start]);
            rest = &rest[start + 1..];
            continue;
        };

        text.push_str(&rest[..start]);
        let tag = rest[start + 1..start + len].trim().to_ascii_lowercase();
        if is_line_break(&tag) {
            text.push('\n');
        }
        rest = &rest[start + len + 1..];
    }
    text.push_str(rest);

    decode_entities(&text)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_line_break(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    matches!(name, "br" | "p" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4")
}

// Longest entity body we try to decode, e.g. `#x10FFFF`
const MAX_ENTITY_LEN: usize = 8;

fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let entity = after
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));

        match entity {
            Some((c, end)) => {
                decoded.push(c);
                rest = &after[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }

    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => None,
    }
}

/// Ordered, immutable list of events
///
/// Never empty; ids are unique.
#[derive(Clone, Debug)]
pub struct EventCatalog {
    events: Vec<Arc<Event>>,
}

impl EventCatalog {
    /// Parses a JSON array of event records
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the JSON is malformed, a date is invalid,
    /// ids repeat, or the array is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawEvent> = serde_json::from_str(json)?;
        let events = raw
            .into_iter()
            .map(RawEvent::into_event)
            .collect::<Result<Vec<_>>>()?;
        Self::from_events(events)
    }

    /// Reads and parses a catalog file
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`EventCatalog::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), events = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The three bands bundled with the crate
    ///
    /// # Errors
    ///
    /// Only fails if the bundled JSON itself is broken.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_BANDS)
    }

    /// Builds a catalog from already normalised events
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] or [`CatalogError::DuplicateEventId`].
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut list = Vec::new();
        for event in events {
            if !seen.insert(event.id.clone()) {
                return Err(CatalogError::DuplicateEventId(event.id));
            }
            list.push(Arc::new(event));
        }

        if list.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { events: list })
    }

    /// Events in catalog order
    #[must_use]
    pub fn list_events(&self) -> &[Arc<Event>] {
        &self.events
    }

    /// Looks up an event by id
    #[must_use]
    pub fn get(&self, id: &EventId) -> Option<&Arc<Event>> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Event active at start-up (the first one)
    #[must_use]
    pub fn default_event(&self) -> &Arc<Event> {
        // non-empty by construction
        &self.events[0]
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if the catalog has no events (never, once built)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
