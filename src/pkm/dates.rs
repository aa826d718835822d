//! Due-date input and display.
//!
//! Parsing is deliberately small: `today`, `tomorrow`, `YYYY-MM-DD` and
//! `YYYY-MM-DD HH:MM`. A bare date means the end of that day.

use crate::error::{PkmError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

const END_OF_DAY: (u32, u32) = (23, 59);

pub fn parse_due_date(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let input = input.trim();
    let today = now.date();

    let date = match input.to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => Some(today + Duration::days(1)),
        _ => None,
    };
    if let Some(date) = date {
        return Ok(end_of_day(date));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(end_of_day(date));
    }

    Err(PkmError::Validation(format!(
        "unrecognized due date '{}' (use today, tomorrow, YYYY-MM-DD or 'YYYY-MM-DD HH:MM')",
        input
    )))
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let (h, m) = END_OF_DAY;
    date.and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN))
}

/// Human label for a due date relative to `now`, e.g. `Today 5:00 PM`,
/// `in 3 days (Nov 29)`, `2 days ago (Nov 24)`.
pub fn format_due_date(due: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (due.date() - now.date()).num_days();
    let time = due.format("%-I:%M %p");
    let day = due.format("%b %-d");

    match days {
        0 => format!("Today {}", time),
        1 => format!("Tomorrow {}", time),
        -1 => format!("Yesterday {}", time),
        d if d > 1 => format!("in {} days ({})", d, day),
        d => format!("{} days ago ({})", -d, day),
    }
}

/// Time of day only, for views where the date is implied.
pub fn format_due_time(due: NaiveDateTime) -> String {
    due.format("%-I:%M %p").to_string()
}
