use self::InvalidDate::*;
use super::FormatValidator;
use crate::LazyLock;
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::fmt;

/// A validator for dates like `2024-02-29` or `2024-2-9 08:30:00`.
///
/// Months and days may omit the leading zero. The date must exist in the
/// Gregorian calendar, which starts at year 1, and the optional time must be
/// a valid `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValidator;

/// An error for the date validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDate {
    /// The value does not look like a date.
    Format,
    /// The date does not exist in the calendar.
    Calendar,
    /// The time is out of range.
    Time,
}

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format => write!(f, "value is not formatted as `YYYY-MM-DD[ HH:MM:SS]`"),
            Calendar => write!(f, "date does not exist in the calendar"),
            Time => write!(f, "time is out of range"),
        }
    }
}

impl std::error::Error for InvalidDate {}

impl FormatValidator<str> for DateValidator {
    type Error = InvalidDate;

    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        let captures = DATE_PATTERN.captures(data).ok_or(Format)?;
        let part = |index: usize| {
            captures
                .get(index)
                .and_then(|m| m.as_str().parse::<u32>().ok())
        };

        let year = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or(Format)?;
        let month = part(2).ok_or(Format)?;
        let day = part(3).ok_or(Format)?;
        if year < 1 {
            return Err(Calendar);
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or(Calendar)?;

        if captures.get(4).is_some() {
            let (hour, min, sec) = part(4)
                .zip(part(5))
                .zip(part(6))
                .map(|((h, m), s)| (h, m, s))
                .ok_or(Format)?;
            NaiveTime::from_hms_opt(hour, min, sec).ok_or(Time)?;
        }
        Ok(())
    }
}

/// Regex for the date with an optional time.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-(0?[1-9]|1[0-2])-(0?[1-9]|[12][0-9]|3[01])(?: ([0-9]{2}):([0-9]{2}):([0-9]{2}))?$",
    )
    .expect("fail to create a regex for the date")
});

#[cfg(test)]
mod tests {
    use super::{DateValidator, InvalidDate};
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_calendar_dates() {
        assert!(DateValidator.validate("2024-02-29").is_ok());
        assert!(DateValidator.validate("2024-2-9").is_ok());
        assert!(DateValidator.validate("2000-02-29 23:59:59").is_ok());
        assert_eq!(DateValidator.validate("2023-02-29"), Err(InvalidDate::Calendar));
        assert_eq!(DateValidator.validate("1900-02-29"), Err(InvalidDate::Calendar));
        assert_eq!(DateValidator.validate("2024-04-31"), Err(InvalidDate::Calendar));
        assert_eq!(DateValidator.validate("0000-01-01"), Err(InvalidDate::Calendar));
        assert_eq!(DateValidator.validate("0000-02-29"), Err(InvalidDate::Calendar));
        assert!(DateValidator.validate("0001-01-01").is_ok());
        assert_eq!(DateValidator.validate("2024-13-01"), Err(InvalidDate::Format));
        assert_eq!(DateValidator.validate("29/02/2024"), Err(InvalidDate::Format));
        assert_eq!(DateValidator.validate("2024-01-01T10:00:00"), Err(InvalidDate::Format));
        assert_eq!(DateValidator.validate("2024-01-01 24:00:00"), Err(InvalidDate::Time));
    }
}
