//! Calendar Event Store
//!
//! In-memory event book backing the `add_event` / `get_events` /
//! `delete_event` tools. Dates are `YYYY-MM-DD`, times `HH:MM`; both are
//! validated on entry. Disk persistence is a collaborator concern.

use std::sync::RwLock;

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{NewswireError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A stored calendar event
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// Input for creating an event
#[derive(Clone, Debug, Default)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub description: String,
    pub time: String,
    pub location: String,
}

fn validate_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| NewswireError::InvalidDate(date.into()))
}

fn validate_time(time: &str) -> Result<()> {
    if time.trim().is_empty() {
        return Ok(());
    }
    NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| NewswireError::InvalidTime(time.into()))
}

/// In-memory event book
pub struct EventBook {
    events: RwLock<Vec<CalendarEvent>>,
}

impl Default for EventBook {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBook {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Validate and store a new event
    pub fn add(&self, new: NewEvent) -> Result<CalendarEvent> {
        validate_date(&new.date)?;
        validate_time(&new.time)?;

        let mut events = self.events.write().unwrap();
        let id = format!("event_{}_{}", events.len() + 1, Utc::now().timestamp());

        let event = CalendarEvent {
            id,
            title: new.title,
            description: new.description,
            date: new.date,
            time: new.time,
            location: new.location,
            created_at: Utc::now(),
        };

        events.push(event.clone());
        tracing::info!(id = %event.id, date = %event.date, "event added");
        Ok(event)
    }

    /// Query events for an exact date, or a window of `days_ahead` days
    /// starting today. Results sort ascending by `(date, time)`; an empty
    /// time orders as `00:00`.
    pub fn query(&self, date: Option<&str>, days_ahead: i64) -> Result<Vec<CalendarEvent>> {
        let events = self.events.read().unwrap();

        let mut matched: Vec<CalendarEvent> = match date {
            Some(date) => {
                validate_date(date)?;
                events.iter().filter(|e| e.date == date).cloned().collect()
            }
            None => {
                let today = Utc::now().date_naive();
                let end = today + chrono::Duration::days(days_ahead);
                events
                    .iter()
                    // Events whose stored date no longer parses are skipped.
                    .filter(|e| {
                        validate_date(&e.date).is_ok_and(|d| d >= today && d <= end)
                    })
                    .cloned()
                    .collect()
            }
        };

        matched.sort_by(|a, b| {
            let time_a = if a.time.is_empty() { "00:00" } else { &a.time };
            let time_b = if b.time.is_empty() { "00:00" } else { &b.time };
            (a.date.as_str(), time_a).cmp(&(b.date.as_str(), time_b))
        });

        Ok(matched)
    }

    /// Delete an event by id; unknown ids leave the book unchanged.
    pub fn remove(&self, event_id: &str) -> Result<CalendarEvent> {
        let mut events = self.events.write().unwrap();

        match events.iter().position(|e| e.id == event_id) {
            Some(pos) => {
                let removed = events.remove(pos);
                tracing::info!(id = %removed.id, "event deleted");
                Ok(removed)
            }
            None => Err(NewswireError::EventNotFound(event_id.into())),
        }
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, date: &str, time: &str) -> NewEvent {
        NewEvent {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_then_query_by_date() {
        let book = EventBook::new();
        book.add(event("Standup", "2025-03-01", "09:00")).unwrap();

        let found = book.query(Some("2025-03-01"), 7).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Standup");
    }

    #[test]
    fn test_same_date_sorts_by_time() {
        let book = EventBook::new();
        book.add(event("Lunch", "2025-03-01", "12:30")).unwrap();
        book.add(event("Standup", "2025-03-01", "09:00")).unwrap();
        book.add(event("All-day", "2025-03-01", "")).unwrap();

        let found = book.query(Some("2025-03-01"), 7).unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["All-day", "Standup", "Lunch"]);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let book = EventBook::new();
        assert!(matches!(
            book.add(event("Bad", "03/01/2025", "")),
            Err(NewswireError::InvalidDate(_))
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_invalid_time_rejected() {
        let book = EventBook::new();
        assert!(matches!(
            book.add(event("Bad", "2025-03-01", "9am")),
            Err(NewswireError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_remove_unknown_id_leaves_count_unchanged() {
        let book = EventBook::new();
        book.add(event("Keep me", "2025-03-01", "")).unwrap();

        assert!(matches!(
            book.remove("event_99_0"),
            Err(NewswireError::EventNotFound(_))
        ));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_remove_returns_deleted_event() {
        let book = EventBook::new();
        let added = book.add(event("Gone", "2025-03-01", "")).unwrap();

        let removed = book.remove(&added.id).unwrap();
        assert_eq!(removed.id, added.id);
        assert!(book.is_empty());
    }

    #[test]
    fn test_window_query_includes_upcoming_only() {
        let book = EventBook::new();
        let today = Utc::now().date_naive();
        let tomorrow = (today + chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let far = (today + chrono::Duration::days(30))
            .format("%Y-%m-%d")
            .to_string();

        book.add(event("Soon", &tomorrow, "")).unwrap();
        book.add(event("Later", &far, "")).unwrap();

        let found = book.query(None, 7).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Soon");
    }
}
