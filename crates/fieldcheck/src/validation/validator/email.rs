use super::FormatValidator;
use crate::LazyLock;
use regex::Regex;
use std::{fmt, net::IpAddr};

/// Maximum length of the local part in bytes.
const MAX_LOCAL_LEN: usize = 64;

/// Maximum length of the domain in bytes.
const MAX_DOMAIN_LEN: usize = 255;

/// A validator for email addresses of the form `local@domain`.
///
/// The address is split at the last `@`. The domain is either a hostname
/// or an IP literal such as `[192.168.0.1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailValidator;

/// One side of an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPart {
    /// The part before the `@`.
    Local,
    /// The part after the `@`.
    Domain,
}

impl AddressPart {
    /// Returns the maximum length in bytes.
    #[inline]
    pub fn max_len(self) -> usize {
        match self {
            Self::Local => MAX_LOCAL_LEN,
            Self::Domain => MAX_DOMAIN_LEN,
        }
    }
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local part"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

/// An error for the email address validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEmail {
    /// The value is empty.
    Empty,
    /// There is no `@` separating the local part from the domain.
    MissingAt,
    /// The part exceeds its maximum length.
    TooLong(AddressPart),
    /// The part contains disallowed characters or is badly shaped.
    Malformed(AddressPart),
}

impl fmt::Display for InvalidEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("the address is empty"),
            Self::MissingAt => f.write_str("the address has no `@`"),
            Self::TooLong(part) => {
                write!(f, "the {part} is longer than {} bytes", part.max_len())
            }
            Self::Malformed(part) => write!(f, "the {part} is malformed"),
        }
    }
}

impl std::error::Error for InvalidEmail {}

impl FormatValidator<str> for EmailValidator {
    type Error = InvalidEmail;

    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InvalidEmail::Empty);
        }
        let (local, domain) = data.rsplit_once('@').ok_or(InvalidEmail::MissingAt)?;
        check_local_part(local)?;
        check_domain(domain)
    }
}

fn check_local_part(local: &str) -> Result<(), InvalidEmail> {
    let part = AddressPart::Local;
    if local.len() > part.max_len() {
        return Err(InvalidEmail::TooLong(part));
    }
    let dotted_edge = local.starts_with('.') || local.ends_with('.');
    if dotted_edge || !LOCAL_PART_PATTERN.is_match(local) {
        return Err(InvalidEmail::Malformed(part));
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), InvalidEmail> {
    let part = AddressPart::Domain;
    if domain.len() > part.max_len() {
        return Err(InvalidEmail::TooLong(part));
    }
    if HOSTNAME_PATTERN.is_match(domain) || is_ip_literal(domain) {
        Ok(())
    } else {
        Err(InvalidEmail::Malformed(part))
    }
}

/// Returns `true` for a bracketed IP address like `[10.0.0.1]` or `[::1]`.
fn is_ip_literal(domain: &str) -> bool {
    domain
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .is_some_and(|ip| ip.parse::<IpAddr>().is_ok())
}

/// Atext characters allowed in the local part.
static LOCAL_PART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+\z")
        .expect("fail to create a regex for the local part")
});

/// Dot-separated labels of at most 63 chars, none starting or ending with `-`.
static HOSTNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i-u)^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*\z",
    )
    .expect("fail to create a regex for the hostname")
});

#[cfg(test)]
mod tests {
    use super::{AddressPart, EmailValidator, InvalidEmail};
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_email_addresses() {
        assert!(EmailValidator.validate("a@b.com").is_ok());
        assert!(EmailValidator.validate("first.last+tag@mail.example.org").is_ok());
        assert!(EmailValidator.validate("admin@[192.168.0.1]").is_ok());
        assert!(EmailValidator.validate("admin@[::1]").is_ok());
        assert_eq!(EmailValidator.validate(""), Err(InvalidEmail::Empty));
        assert_eq!(EmailValidator.validate("not-an-email"), Err(InvalidEmail::MissingAt));
        assert_eq!(
            EmailValidator.validate("a b@c.com"),
            Err(InvalidEmail::Malformed(AddressPart::Local))
        );
        assert_eq!(
            EmailValidator.validate(".a@c.com"),
            Err(InvalidEmail::Malformed(AddressPart::Local))
        );
        assert_eq!(
            EmailValidator.validate("a@-c.com"),
            Err(InvalidEmail::Malformed(AddressPart::Domain))
        );
        assert_eq!(
            EmailValidator.validate("a@[not-an-ip]"),
            Err(InvalidEmail::Malformed(AddressPart::Domain))
        );
    }

    #[test]
    fn it_limits_part_lengths() {
        let local = "a".repeat(65);
        assert_eq!(
            EmailValidator.validate(&format!("{local}@c.com")),
            Err(InvalidEmail::TooLong(AddressPart::Local))
        );
        assert!(EmailValidator.validate(&format!("{}@c.com", "a".repeat(64))).is_ok());

        let domain = vec!["a".repeat(60); 5].join(".");
        let err = EmailValidator.validate(&format!("a@{domain}")).unwrap_err();
        assert_eq!(err, InvalidEmail::TooLong(AddressPart::Domain));
        assert_eq!(err.to_string(), "the domain is longer than 255 bytes");
    }
}
