use super::{RuleError, unique::Exclusion};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A named validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Rule {
    /// The value must be present and not empty.
    Required,
    /// The value must have at least a number of characters.
    #[serde(rename = "min", alias = "minLength")]
    MinLength,
    /// The value must have at most a number of characters.
    #[serde(rename = "max", alias = "maxLength")]
    MaxLength,
    /// The value must not exist in a database column.
    Unique,
    /// The value must be an email address.
    Email,
    /// The value must only contain ASCII letters.
    String,
    /// The value must be an integer.
    Int,
    /// The value must be an absolute URL.
    Url,
    /// The value must be a URI path made of `[A-Za-z0-9-/_]`.
    Uri,
    /// The value must be a calendar date with an optional time.
    Date,
    /// The value must be a monetary amount.
    Money,
}

impl Rule {
    /// Returns the rule name, which is also the key in a message table.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::MinLength => "min",
            Rule::MaxLength => "max",
            Rule::Unique => "unique",
            Rule::Email => "email",
            Rule::String => "string",
            Rule::Int => "int",
            Rule::Url => "url",
            Rule::Uri => "uri",
            Rule::Date => "date",
            Rule::Money => "money",
        }
    }

    /// Returns `true` if empty values always pass the rule.
    #[inline]
    pub fn allows_empty(&self) -> bool {
        matches!(
            self,
            Rule::Email | Rule::String | Rule::Int | Rule::Url | Rule::Uri | Rule::Date | Rule::Money
        )
    }
}

impl fmt::Display for Rule {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = match s.trim() {
            "required" => Rule::Required,
            "min" | "minLength" => Rule::MinLength,
            "max" | "maxLength" => Rule::MaxLength,
            "unique" => Rule::Unique,
            "email" => Rule::Email,
            "string" => Rule::String,
            "int" => Rule::Int,
            "url" => Rule::Url,
            "uri" => Rule::Uri,
            "date" => Rule::Date,
            "money" => Rule::Money,
            name => return Err(RuleError::malformed(name, "unsupported rule")),
        };
        Ok(rule)
    }
}

/// A rule together with its parameters.
///
/// It is parsed from expressions like `min:3` or `unique:users,id,5`,
/// and a list of them from `required|min:3|max:20`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    /// `required`
    Required,
    /// `min:{count}`
    MinLength(usize),
    /// `max:{count}`
    MaxLength(usize),
    /// `unique:{table}[,{column},{value}]`
    Unique {
        /// Table name.
        table: String,
        /// An optional row to exclude, used when updating the row itself.
        exclusion: Option<Exclusion>,
    },
    /// `email`
    Email,
    /// `string`
    String,
    /// `int`
    Int,
    /// `url`
    Url,
    /// `uri`
    Uri,
    /// `date`
    Date,
    /// `money`
    Money,
}

impl RuleSpec {
    /// Parses a list of rules separated by `|`. Blank segments are skipped.
    pub fn parse_list(rules: &str) -> Result<Vec<RuleSpec>, RuleError> {
        rules
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(RuleSpec::from_str)
            .collect()
    }
}

impl FromStr for RuleSpec {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, params) = match s.split_once(':') {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (s.trim(), None),
        };
        let rule = name.parse::<Rule>()?;
        let params = params
            .map(|params| params.split(',').map(str::trim).collect::<Vec<_>>())
            .unwrap_or_default();
        let spec = match rule {
            Rule::MinLength => RuleSpec::MinLength(parse_count(rule, &params)?),
            Rule::MaxLength => RuleSpec::MaxLength(parse_count(rule, &params)?),
            Rule::Unique => match params.as_slice() {
                [table] if !table.is_empty() => RuleSpec::Unique {
                    table: (*table).to_owned(),
                    exclusion: None,
                },
                [table, column, value] if !table.is_empty() => RuleSpec::Unique {
                    table: (*table).to_owned(),
                    exclusion: Some(Exclusion::new(*column, *value)),
                },
                _ => {
                    return Err(RuleError::malformed(
                        rule,
                        "expected parameters `{table}` or `{table},{column},{value}`",
                    ));
                }
            },
            _ if !params.is_empty() => {
                return Err(RuleError::malformed(rule, "the rule takes no parameters"));
            }
            Rule::Required => RuleSpec::Required,
            Rule::Email => RuleSpec::Email,
            Rule::String => RuleSpec::String,
            Rule::Int => RuleSpec::Int,
            Rule::Url => RuleSpec::Url,
            Rule::Uri => RuleSpec::Uri,
            Rule::Date => RuleSpec::Date,
            Rule::Money => RuleSpec::Money,
        };
        Ok(spec)
    }
}

/// Parses the single count parameter of a length rule.
fn parse_count(rule: Rule, params: &[&str]) -> Result<usize, RuleError> {
    match params {
        [count] => count
            .parse()
            .map_err(|_| RuleError::malformed(rule, format!("invalid count `{count}`"))),
        [] => Err(RuleError::malformed(rule, "missing the count parameter")),
        _ => Err(RuleError::malformed(rule, "expected a single count parameter")),
    }
}

#[cfg(test)]
mod tests {
    use super::{Rule, RuleSpec};
    use crate::validation::{RuleError, unique::Exclusion};

    #[test]
    fn it_parses_rule_names() {
        assert_eq!("min".parse::<Rule>().unwrap(), Rule::MinLength);
        assert_eq!("maxLength".parse::<Rule>().unwrap(), Rule::MaxLength);
        assert_eq!(Rule::MinLength.as_str(), "min");
        assert!("phone".parse::<Rule>().is_err());
        assert!(Rule::Email.allows_empty());
        assert!(!Rule::Required.allows_empty());
        assert!(!Rule::MaxLength.allows_empty());
    }

    #[test]
    fn it_parses_rule_lists() {
        let specs = RuleSpec::parse_list("required|min:3| max:20 |unique:users,id,5|email").unwrap();
        assert_eq!(
            specs,
            vec![
                RuleSpec::Required,
                RuleSpec::MinLength(3),
                RuleSpec::MaxLength(20),
                RuleSpec::Unique {
                    table: "users".to_owned(),
                    exclusion: Some(Exclusion::new("id", "5")),
                },
                RuleSpec::Email,
            ]
        );
        assert_eq!(
            "unique:users".parse::<RuleSpec>().unwrap(),
            RuleSpec::Unique {
                table: "users".to_owned(),
                exclusion: None,
            }
        );
        assert!(RuleSpec::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn it_rejects_malformed_rules() {
        for rules in ["min", "min:abc", "max:1,2", "unique", "unique:users,id", "email:x", "foo"] {
            let err = RuleSpec::parse_list(rules).unwrap_err();
            assert!(matches!(err, RuleError::Malformed { .. }), "{rules}");
        }
    }
}
