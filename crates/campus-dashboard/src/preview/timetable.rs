//! Timetable card: the next lessons.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of lessons shown on the card.
pub const MAX_LESSONS: usize = 2;

/// One timetable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Full course name.
    pub name: String,
    /// Abbreviation, when the course has one.
    #[serde(default)]
    pub short_name: Option<String>,
    /// Room the lesson takes place in.
    pub room: String,
    /// Local start time.
    pub start: NaiveDateTime,
    /// Local end time.
    pub end: NaiveDateTime,
}

impl Lesson {
    /// Short name, falling back to the full name.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// Summarizes the next [`MAX_LESSONS`] lessons that have not ended by `now`.
///
/// Each lesson yields two lines: `"<short name> in <room>"` and its start,
/// e.g. `"today at 09:45"`.
pub fn upcoming_lessons(lessons: &[Lesson], now: NaiveDateTime) -> Vec<String> {
    let mut upcoming: Vec<&Lesson> = lessons.iter().filter(|l| l.end > now).collect();
    upcoming.sort_by_key(|l| l.start);

    upcoming
        .into_iter()
        .take(MAX_LESSONS)
        .flat_map(|lesson| {
            [
                format!("{} in {}", lesson.display_name(), lesson.room),
                format!(
                    "{} at {}",
                    near_date(lesson.start, now),
                    lesson.start.format("%H:%M")
                ),
            ]
        })
        .collect()
}

fn near_date(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let (day, today) = (at.date(), now.date());
    if day == today {
        "today".to_string()
    } else if today.checked_add_signed(Duration::days(1)) == Some(day) {
        "tomorrow".to_string()
    } else {
        day.format("%a %d.%m.").to_string()
    }
}
