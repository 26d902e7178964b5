use super::FormatValidator;
use crate::{LazyLock, bail, error::Error};
use regex::Regex;

/// A validator for URI paths made of ASCII letters, digits, `-`, `/` and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriPathValidator;

impl FormatValidator<str> for UriPathValidator {
    type Error = Error;

    #[inline]
    fn validate(&self, data: &str) -> Result<(), Self::Error> {
        if !URI_PATH_PATTERN.is_match(data) {
            bail!("the value `{}` is not a URI path", data);
        }
        Ok(())
    }
}

/// Regex for the URI path.
static URI_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9\-/_]+$").expect("fail to create a regex for the URI path")
});

#[cfg(test)]
mod tests {
    use super::UriPathValidator;
    use crate::validation::validator::FormatValidator;

    #[test]
    fn it_validates_uri_paths() {
        assert!(UriPathValidator.validate("blog/2024/hello-world").is_ok());
        assert!(UriPathValidator.validate("/about_us").is_ok());
        assert!(UriPathValidator.validate("search?q=rust").is_err());
        assert!(UriPathValidator.validate("a b").is_err());
        assert!(UriPathValidator.validate("caf\u{e9}").is_err());
    }
}
