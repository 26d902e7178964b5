use super::{FieldValue, Rule};
use crate::error::Error;
use ahash::{HashMap, HashMapExt};
use std::{fmt, str::FromStr};
use toml::value::Table;

/// Caller-supplied overrides of the default messages, keyed by field and rule.
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    messages: HashMap<String, HashMap<Rule, String>>,
}

impl MessageTable {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Parses a table whose keys are field names and whose values are tables
    /// mapping rule names to messages.
    pub fn from_table(table: &Table) -> Result<Self, Error> {
        let mut messages = Self::new();
        for (field, rules) in table {
            let Some(rules) = rules.as_table() else {
                crate::bail!("messages for the field `{}` should be a table", field);
            };
            for (rule, message) in rules {
                let Some(message) = message.as_str() else {
                    crate::bail!("the `{}.{}` message should be a string", field, rule);
                };
                let rule = rule.parse::<Rule>().map_err(|err| {
                    Error::with_source(format!("invalid message key `{field}.{rule}`"), err)
                })?;
                messages.insert(field.as_str(), rule, message);
            }
        }
        Ok(messages)
    }

    /// Inserts a message for the field and rule, returning `self` for chaining.
    #[inline]
    pub fn with(mut self, field: &str, rule: Rule, message: impl Into<String>) -> Self {
        self.insert(field, rule, message);
        self
    }

    /// Inserts a message for the field and rule.
    #[inline]
    pub fn insert(&mut self, field: &str, rule: Rule, message: impl Into<String>) {
        self.messages
            .entry(field.to_owned())
            .or_default()
            .insert(rule, message.into());
    }

    /// Returns the message for the field and rule.
    #[inline]
    pub fn get(&self, field: &str, rule: Rule) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|rules| rules.get(&rule))
            .map(|message| message.as_str())
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.values().all(|rules| rules.is_empty())
    }
}

/// A wrapper template applied to every recorded message.
///
/// All occurrences of the `:message` placeholder are substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFormat {
    template: String,
}

impl MessageFormat {
    /// The placeholder substituted by a message.
    pub const PLACEHOLDER: &'static str = ":message";

    /// Parses the template, which must contain the placeholder.
    pub fn parse(template: impl Into<String>) -> Result<Self, Error> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            crate::bail!(
                "the message format `{}` does not contain the `{}` placeholder",
                template,
                Self::PLACEHOLDER
            );
        }
        Ok(Self { template })
    }

    /// Wraps the message.
    #[inline]
    pub fn apply(&self, message: &str) -> String {
        self.template.replace(Self::PLACEHOLDER, message)
    }
}

impl Default for MessageFormat {
    #[inline]
    fn default() -> Self {
        Self {
            template: Self::PLACEHOLDER.to_owned(),
        }
    }
}

impl FromStr for MessageFormat {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageFormat {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Parameters embedded in a default message.
#[derive(Debug, Clone, Copy)]
pub(super) enum MessageParam<'a> {
    None,
    Count(usize),
    Value(&'a FieldValue<'a>),
}

/// Synthesizes the default message for a failed rule.
pub(super) fn default_message(field: &str, rule: Rule, param: MessageParam<'_>) -> String {
    match (rule, param) {
        (Rule::Required, _) => format!("The field \"{field}\" is required."),
        (Rule::MinLength, MessageParam::Count(min)) => {
            format!("The field \"{field}\" must have at least {min} characters.")
        }
        (Rule::MaxLength, MessageParam::Count(max)) => {
            format!("The field \"{field}\" may have at most {max} characters.")
        }
        (Rule::MinLength, _) => format!("The field \"{field}\" is too short."),
        (Rule::MaxLength, _) => format!("The field \"{field}\" is too long."),
        (Rule::Unique, MessageParam::Value(value)) => format!(
            "The value \"{value}\" of the field \"{field}\" is already registered. \
             Please choose another one."
        ),
        (Rule::Unique, _) => format!("The field \"{field}\" is already registered."),
        (Rule::Email, _) => format!("The field \"{field}\" is not a valid email address."),
        (Rule::String, _) => format!("The field \"{field}\" may only contain letters."),
        (Rule::Int, _) => format!("The field \"{field}\" is not a valid integer."),
        (Rule::Url, _) => format!("The field \"{field}\" is not a valid URL."),
        (Rule::Uri, _) => format!("The field \"{field}\" is not a valid URI."),
        (Rule::Date, _) => format!("The field \"{field}\" is not a valid date."),
        (Rule::Money, _) => {
            format!("The field \"{field}\" is not a valid monetary amount.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageFormat, MessageParam, MessageTable, default_message};
    use crate::validation::{FieldValue, Rule};

    #[test]
    fn it_wraps_messages() {
        let format = MessageFormat::parse("<li class=\"error\">:message</li>").unwrap();
        assert_eq!(format.apply("Oops."), "<li class=\"error\">Oops.</li>");
        assert_eq!(MessageFormat::default().apply("Oops."), "Oops.");
        assert_eq!(
            MessageFormat::parse(":message | :message").unwrap().apply("x"),
            "x | x"
        );
        assert!(MessageFormat::parse("<li></li>").is_err());
    }

    #[test]
    fn it_loads_messages_from_toml() {
        let table: toml::Table = r#"
            [email]
            required = "Tell us your email."
            unique = "This email is taken."
            [password]
            minLength = "Choose a longer password."
        "#
        .parse()
        .unwrap();
        let messages = MessageTable::from_table(&table).unwrap();
        assert_eq!(messages.get("email", Rule::Required), Some("Tell us your email."));
        assert_eq!(
            messages.get("password", Rule::MinLength),
            Some("Choose a longer password.")
        );
        assert!(messages.get("email", Rule::Email).is_none());

        let table: toml::Table = "[email]\nphone = \"x\"".parse().unwrap();
        assert!(MessageTable::from_table(&table).is_err());
        let table: toml::Table = "email = \"x\"".parse().unwrap();
        assert!(MessageTable::from_table(&table).is_err());
    }

    #[test]
    fn it_embeds_parameters_into_default_messages() {
        assert_eq!(
            default_message("password", Rule::MinLength, MessageParam::Count(8)),
            "The field \"password\" must have at least 8 characters."
        );
        let value = FieldValue::from("bob");
        assert!(
            default_message("username", Rule::Unique, MessageParam::Value(&value))
                .contains("\"bob\"")
        );
        assert!(MessageTable::new().with("a", Rule::Int, "x").get("a", Rule::Int).is_some());
    }
}
