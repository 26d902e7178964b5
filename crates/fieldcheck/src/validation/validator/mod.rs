//! Format checks behind the rules.

mod absolute_url;
mod ascii_alphabetic;
mod date;
mod email;
mod integer;
mod money;
mod uri_path;

pub use absolute_url::UrlValidator;
pub use ascii_alphabetic::AsciiAlphabeticValidator;
pub use date::{DateValidator, InvalidDate};
pub use email::{AddressPart, EmailValidator, InvalidEmail};
pub use integer::{IntegerValidator, InvalidInteger};
pub use money::MoneyValidator;
pub use uri_path::UriPathValidator;

/// A format validator.
pub trait FormatValidator<T: ?Sized> {
    /// The error type.
    type Error: Into<crate::error::Error>;

    /// Validates the data.
    fn validate(&self, data: &T) -> Result<(), Self::Error>;
}
