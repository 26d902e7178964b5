use self::Env::*;
use crate::SharedString;
use std::{fmt, str::FromStr};

/// Application running environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Env {
    #[default]
    /// The `development` environment.
    Dev,
    /// The `production` environment.
    Prod,
    /// A custom environment.
    Custom(SharedString),
}

impl Env {
    /// Returns `true` if `self` is the `development` environment.
    #[inline]
    pub fn is_dev(&self) -> bool {
        matches!(self, Dev)
    }

    /// Returns `true` if `self` is the `production` environment.
    #[inline]
    pub fn is_prod(&self) -> bool {
        matches!(self, Prod)
    }

    /// Returns `self` as `&str`.
    /// It is also the key of the database connection table for the env.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Dev => "development",
            Prod => "production",
            Custom(name) => &**name,
        }
    }
}

impl fmt::Display for Env {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let env = self.as_str();
        write!(f, "{env}")
    }
}

impl From<&str> for Env {
    #[inline]
    fn from(env: &str) -> Self {
        match env.trim() {
            "dev" | "development" => Dev,
            "prod" | "production" => Prod,
            name => Custom(name.to_owned().into()),
        }
    }
}

impl FromStr for Env {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Env;

    #[test]
    fn it_parses_env_names() {
        assert!(Env::from("dev").is_dev());
        assert!(Env::from("development").is_dev());
        assert!(Env::from("production").is_prod());
        assert_eq!(Env::from("staging").as_str(), "staging");
        assert_eq!(Env::Prod.to_string(), "production");
    }
}
