use super::FormatValidator;
use crate::{LazyLock, bail, error::Error};
use regex::Regex;

/// A validator for monetary amounts with up to 10 integer digits
/// and an optional fraction of up to 9 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyValidator;

impl FormatValidator<str> for MoneyValidator {
    type Error = Error;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if !MONEY_PATTERN.is_match(data) {
            bail!("the value `{}` is not a monetary amount", data);
        }
        Ok(())
    }
}

/// Regex for the monetary amount.
static MONEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,10}(?:\.[0-9]{1,9})?$")
        .expect("fail to create a regex for the monetary amount")
});

#[cfg(test)]
mod tests {
    use super::MoneyValidator;
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_monetary_amounts() {
        assert!(MoneyValidator.validate("0").is_ok());
        assert!(MoneyValidator.validate("19.90").is_ok());
        assert!(MoneyValidator.validate("1234567890.123456789").is_ok());
        assert!(MoneyValidator.validate("12345678901").is_err());
        assert!(MoneyValidator.validate("1.1234567890").is_err());
        assert!(MoneyValidator.validate("1,50").is_err());
        assert!(MoneyValidator.validate("-5").is_err());
        assert!(MoneyValidator.validate("5.").is_err());
    }
}
