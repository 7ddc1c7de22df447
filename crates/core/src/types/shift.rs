//! Shift scheduling window.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Form date format for shift dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Form time format for shift start and end.
pub const TIME_FORMAT: &str = "%H:%M";

/// Errors from [`ShiftWindow::parse`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftWindowError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    Date(String),
    #[error("invalid time {0:?}, expected HH:MM")]
    Time(String),
    #[error("shift starts and ends at the same time")]
    Empty,
}

/// The date and start/end times of a shift.
///
/// A window whose `end` is earlier than its `start` runs past midnight into
/// the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ShiftWindow {
    /// Build a window, rejecting one with zero length.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftWindowError::Empty`] if `end == start`.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, ShiftWindowError> {
        if end == start {
            return Err(ShiftWindowError::Empty);
        }
        Ok(Self { date, start, end })
    }

    /// Parse the window from form strings (`%Y-%m-%d`, `%H:%M`, `%H:%M`).
    ///
    /// Seconds are accepted on times (`%H:%M:%S`) since some browsers send them.
    ///
    /// # Errors
    ///
    /// Returns a [`ShiftWindowError`] for unparsable input or an empty window.
    pub fn parse(date: &str, start: &str, end: &str) -> Result<Self, ShiftWindowError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| ShiftWindowError::Date(date.to_owned()))?;
        Self::new(date, parse_time(start)?, parse_time(end)?)
    }

    /// Whether the shift ends on the day after `date`.
    #[must_use]
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Length of the shift in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        let minutes = (self.end - self.start).num_minutes();
        if self.is_overnight() {
            minutes + 24 * 60
        } else {
            minutes
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, ShiftWindowError> {
    let t = s.trim();
    NaiveTime::parse_from_str(t, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .map_err(|_| ShiftWindowError::Time(s.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let w = ShiftWindow::parse("2024-03-01", "09:00", "17:30").unwrap();
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(w.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(w.duration_minutes(), 510);
    }

    #[test]
    fn test_parse_accepts_seconds() {
        let w = ShiftWindow::parse("2024-03-01", "09:00:00", "10:00:00").unwrap();
        assert_eq!(w.duration_minutes(), 60);
    }

    #[test]
    fn test_parse_bad_date() {
        assert_eq!(
            ShiftWindow::parse("03/01/2024", "09:00", "17:00"),
            Err(ShiftWindowError::Date("03/01/2024".to_owned()))
        );
        assert!(ShiftWindow::parse("2024-02-30", "09:00", "17:00").is_err());
    }

    #[test]
    fn test_parse_bad_time() {
        assert_eq!(
            ShiftWindow::parse("2024-03-01", "9am", "17:00"),
            Err(ShiftWindowError::Time("9am".to_owned()))
        );
        assert!(ShiftWindow::parse("2024-03-01", "09:00", "25:00").is_err());
    }

    #[test]
    fn test_overnight_shift() {
        let w = ShiftWindow::parse("2024-03-01", "18:00", "01:00").unwrap();
        assert!(w.is_overnight());
        assert_eq!(w.duration_minutes(), 7 * 60);

        let day = ShiftWindow::parse("2024-03-01", "09:00", "17:00").unwrap();
        assert!(!day.is_overnight());
    }

    #[test]
    fn test_zero_length_rejected() {
        assert_eq!(
            ShiftWindow::parse("2024-03-01", "09:00", "09:00"),
            Err(ShiftWindowError::Empty)
        );
        assert_eq!(
            ShiftWindow::parse("2024-03-01", "09:00", "09:00:00"),
            Err(ShiftWindowError::Empty)
        );
    }
}
