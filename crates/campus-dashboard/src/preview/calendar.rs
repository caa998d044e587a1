//! Calendar card: upcoming semester dates and exams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PreviewError;

/// Events shown on the card.
pub const MAX_EVENTS: usize = 2;

/// A dated entry on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Display name.
    pub name: String,
    /// Start.
    pub begin: DateTime<Utc>,
    /// End, for events spanning a period.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// An exam as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    /// Course title.
    pub title: String,
    /// Exam date; unscheduled exams have none.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Exam {
    fn into_event(self) -> Option<CalendarEvent> {
        let begin = self.date?;
        Some(CalendarEvent {
            name: format!("Exam {}", self.title),
            begin,
            end: None,
        })
    }
}

/// Merges static `events` with the result of loading exams.
///
/// Exams without a date are dropped. A failed exam load leaves only the
/// static events, except [`PreviewError::NoSession`], which is returned so
/// the caller can ask for a new login. The result is sorted by begin and
/// keeps only events that begin or end after `now`.
pub fn upcoming_events(
    events: &[CalendarEvent],
    exams: Result<Vec<Exam>, PreviewError>,
    now: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>, PreviewError> {
    let exams = match exams {
        Ok(exams) => exams,
        Err(PreviewError::NoSession) => return Err(PreviewError::NoSession),
        Err(PreviewError::QueryUnavailable) => Vec::new(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load exams");
            Vec::new()
        }
    };

    let mut merged: Vec<CalendarEvent> = events
        .iter()
        .cloned()
        .chain(exams.into_iter().filter_map(Exam::into_event))
        .collect();
    merged.sort_by_key(|e| e.begin);
    merged.retain(|e| e.begin > now || e.end.is_some_and(|end| end > now));
    Ok(merged)
}

/// Renders the first [`MAX_EVENTS`] events.
///
/// A running event shows when it ends, any other when it begins.
pub fn calendar_preview(upcoming: &[CalendarEvent], now: DateTime<Utc>) -> Vec<String> {
    upcoming
        .iter()
        .take(MAX_EVENTS)
        .map(|event| match event.end {
            Some(end) if event.begin < now => {
                format!("{}: ends in {}", event.name, relative(end - now))
            }
            _ => format!("{}: begins in {}", event.name, relative(event.begin - now)),
        })
        .collect()
}

/// Whole minutes, at least one.
fn relative(delta: chrono::Duration) -> String {
    let minutes = (delta.num_seconds().max(0) / 60).max(1) as u64;
    humantime::format_duration(std::time::Duration::from_secs(minutes * 60)).to_string()
}
