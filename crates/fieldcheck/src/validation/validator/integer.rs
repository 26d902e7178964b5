use self::InvalidInteger::*;
use super::FormatValidator;
use std::fmt;

/// A validator for decimal integers which fit in `i64`.
///
/// Surrounding ASCII whitespace and a leading sign are accepted,
/// while leading zeros are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerValidator;

/// An error for the integer validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInteger {
    /// The value is empty.
    Empty,
    /// The value contains a non-digit character.
    InvalidDigit,
    /// The value has a leading zero.
    LeadingZero,
    /// The value does not fit in `i64`.
    OutOfRange,
}

impl fmt::Display for InvalidInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Empty => write!(f, "value is empty"),
            InvalidDigit => write!(f, "value contains a non-digit character"),
            LeadingZero => write!(f, "value has a leading zero"),
            OutOfRange => write!(f, "value is out of the 64-bit integer range"),
        }
    }
}

impl std::error::Error for InvalidInteger {}

impl FormatValidator<str> for IntegerValidator {
    type Error = InvalidInteger;

    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        let data = data.trim_ascii();
        let digits = data.strip_prefix(['+', '-']).unwrap_or(data);
        if digits.is_empty() {
            return Err(Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidDigit);
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(LeadingZero);
        }
        data.parse::<i64>().map_err(|_| OutOfRange)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IntegerValidator, InvalidInteger};
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_integers() {
        for value in ["0", "42", "-17", "+8", " 99 ", "9223372036854775807"] {
            assert!(IntegerValidator.validate(value).is_ok(), "{value}");
        }
        assert_eq!(IntegerValidator.validate("-"), Err(InvalidInteger::Empty));
        assert_eq!(IntegerValidator.validate("1.5"), Err(InvalidInteger::InvalidDigit));
        assert_eq!(IntegerValidator.validate("12a"), Err(InvalidInteger::InvalidDigit));
        assert_eq!(IntegerValidator.validate("007"), Err(InvalidInteger::LeadingZero));
        assert_eq!(
            IntegerValidator.validate("9223372036854775808"),
            Err(InvalidInteger::OutOfRange)
        );
    }
}
