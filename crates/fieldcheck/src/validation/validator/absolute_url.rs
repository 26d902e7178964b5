use super::FormatValidator;
use crate::{bail, error::Error};
use url::Url;

/// A validator for absolute URLs.
///
/// URLs with the `http`, `https` or `ftp` scheme must have a non-empty host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlValidator;

impl FormatValidator<str> for UrlValidator {
    type Error = Error;

    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if let Some(ch) = data.chars().find(|ch| ch.is_whitespace() || ch.is_control()) {
            bail!("the URL contains an unexpected char `{}`", ch.escape_debug());
        }

        let url = Url::parse(data)?;
        if matches!(url.scheme(), "http" | "https" | "ftp")
            && url.host_str().is_none_or(|host| host.is_empty())
        {
            bail!("the URL `{}` does not have a host", data);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UrlValidator;
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_urls() {
        assert!(UrlValidator.validate("https://example.com").is_ok());
        assert!(UrlValidator.validate("http://localhost:8080/path?q=1#top").is_ok());
        assert!(UrlValidator.validate("mailto:alice@example.com").is_ok());
        assert!(UrlValidator.validate("example.com").is_err());
        assert!(UrlValidator.validate("/relative/path").is_err());
        assert!(UrlValidator.validate("https://exa mple.com").is_err());
        assert!(UrlValidator.validate(" https://example.com").is_err());
        assert!(UrlValidator.validate("http://").is_err());
    }
}
