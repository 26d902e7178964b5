//! Form validation with accumulated, display-ready error messages.
//!
//! A [`Validator`] is created for one validation pass. Each rule method checks
//! a single field value; when the value is rejected, exactly one message is
//! resolved from the [`MessageTable`] (or synthesized from a default template),
//! wrapped by the [`MessageFormat`], and recorded. Rules never short-circuit
//! each other, so the caller gets every problem of the pass at once.
//!
//! ```rust
//! use fieldcheck::validation::{MessageTable, Rule, Validator};
//!
//! let messages = MessageTable::new().with("email", Rule::Required, "Tell us your email.");
//! let mut validator = Validator::new().with_messages(messages);
//! validator.required("email", "");
//! validator.date("birthday", "2023-02-29");
//!
//! assert!(validator.has_errors());
//! assert_eq!(validator.messages()[0], "Tell us your email.");
//! ```
use crate::{Map, error::Error, extension::TomlTableExt, state::Config};
use serde::Serialize;
use smallvec::SmallVec;
use std::{fmt, sync::Arc};

mod error;
mod message;
mod rule;
mod unique;
mod value;

pub mod validator;

pub use error::RuleError;
pub use message::{MessageFormat, MessageTable};
pub use rule::{Rule, RuleSpec};
pub use unique::{Exclusion, RowCounter, UniqueQuery};
pub use value::FieldValue;

use message::{MessageParam, default_message};
use validator::{
    AsciiAlphabeticValidator, DateValidator, EmailValidator, FormatValidator, IntegerValidator,
    MoneyValidator, UriPathValidator, UrlValidator,
};

/// A recorded rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    /// Field name.
    pub field: String,
    /// The rule which rejected the value.
    pub rule: Rule,
    /// The formatted message.
    pub message: String,
}

/// A validator for one validation pass.
#[derive(Default)]
pub struct Validator {
    /// Custom messages.
    messages: MessageTable,
    /// Message wrapper.
    format: MessageFormat,
    /// Row counter for the `unique` rule.
    row_counter: Option<Arc<dyn RowCounter>>,
    /// Failed entries in invocation order.
    failed_entries: SmallVec<[FailedEntry; 4]>,
}

impl Validator {
    /// Creates a new instance with default messages and no wrapper.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new instance from the `[validation]` table of the config,
    /// which may contain a `format` template and a `messages` table.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut validator = Self::new();
        if let Some(validation) = config.validation() {
            if let Some(template) = validation.get_str("format") {
                validator.format = MessageFormat::parse(template)?;
            }
            if let Some(messages) = validation.get_table("messages") {
                validator.messages = MessageTable::from_table(messages)?;
            }
        }
        Ok(validator)
    }

    /// Sets the custom messages.
    #[inline]
    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    /// Sets the message wrapper.
    #[inline]
    pub fn with_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the row counter used by the `unique` rule.
    #[inline]
    pub fn with_row_counter(mut self, row_counter: Arc<dyn RowCounter>) -> Self {
        self.row_counter = Some(row_counter);
        self
    }

    /// Checks that the value is present and not empty.
    pub fn required<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        let value = value.into();
        if !value.is_empty() {
            return true;
        }
        self.record_fail(field, Rule::Required, MessageParam::None);
        false
    }

    /// Checks that the value has at least `min` characters. Empty values are not exempt.
    ///
    /// Length is the number of Unicode scalar values, not bytes,
    /// so `"Zoë"` has 3 characters.
    pub fn min_length<'a>(
        &mut self,
        field: &str,
        value: impl Into<FieldValue<'a>>,
        min: usize,
    ) -> bool {
        if value.into().char_count() >= min {
            return true;
        }
        self.record_fail(field, Rule::MinLength, MessageParam::Count(min));
        false
    }

    /// Checks that the value has at most `max` characters.
    ///
    /// Length is the number of Unicode scalar values, not bytes,
    /// so `"Zoë"` has 3 characters.
    pub fn max_length<'a>(
        &mut self,
        field: &str,
        value: impl Into<FieldValue<'a>>,
        max: usize,
    ) -> bool {
        if value.into().char_count() <= max {
            return true;
        }
        self.record_fail(field, Rule::MaxLength, MessageParam::Count(max));
        false
    }

    /// Checks that no row in `table` has the value in the column named after the field,
    /// optionally excluding one row.
    ///
    /// Empty values are looked up like any other value.
    /// A failed query is returned as [`RuleError::Dependency`] and nothing is recorded.
    pub fn unique<'a>(
        &mut self,
        field: &str,
        value: impl Into<FieldValue<'a>>,
        table: &str,
        exclusion: Option<&Exclusion>,
    ) -> Result<bool, RuleError> {
        let value = value.into();
        let query = UniqueQuery::new(table, field, &value, exclusion)?;
        let row_counter = self
            .row_counter
            .as_ref()
            .ok_or(RuleError::DatabaseUnavailable)?;
        let count = row_counter.count_rows(&query).map_err(|err| {
            let err = err.wrap(format!("fail to count rows in `{table}`"));
            tracing::error!(field, table, cause = err.root_cause().message(), "{err}");
            RuleError::Dependency(err)
        })?;
        if count == 0 {
            return Ok(true);
        }
        tracing::debug!(field, table, count, "value is not unique");
        self.record_fail(field, Rule::Unique, MessageParam::Value(&value));
        Ok(false)
    }

    /// Checks that the value is empty or an email address.
    pub fn email<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Email, &EmailValidator)
    }

    /// Checks that the value is empty or only contains ASCII letters.
    pub fn string<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::String, &AsciiAlphabeticValidator)
    }

    /// Checks that the value is empty or an integer.
    pub fn int<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Int, &IntegerValidator)
    }

    /// Checks that the value is empty or an absolute URL.
    pub fn url<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Url, &UrlValidator)
    }

    /// Checks that the value is empty or a URI path made of `[A-Za-z0-9-/_]`.
    pub fn uri<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Uri, &UriPathValidator)
    }

    /// Checks that the value is empty or a calendar date with an optional time.
    pub fn date<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Date, &DateValidator)
    }

    /// Checks that the value is empty or a monetary amount.
    pub fn money<'a>(&mut self, field: &str, value: impl Into<FieldValue<'a>>) -> bool {
        self.check_format(field, value.into(), Rule::Money, &MoneyValidator)
    }

    /// Checks the value against a parsed rule.
    pub fn check(
        &mut self,
        field: &str,
        value: &FieldValue<'_>,
        spec: &RuleSpec,
    ) -> Result<bool, RuleError> {
        let value = value.clone();
        let passed = match spec {
            RuleSpec::Required => self.required(field, value),
            RuleSpec::MinLength(min) => self.min_length(field, value, *min),
            RuleSpec::MaxLength(max) => self.max_length(field, value, *max),
            RuleSpec::Unique { table, exclusion } => {
                self.unique(field, value, table, exclusion.as_ref())?
            }
            RuleSpec::Email => self.email(field, value),
            RuleSpec::String => self.string(field, value),
            RuleSpec::Int => self.int(field, value),
            RuleSpec::Url => self.url(field, value),
            RuleSpec::Uri => self.uri(field, value),
            RuleSpec::Date => self.date(field, value),
            RuleSpec::Money => self.money(field, value),
        };
        Ok(passed)
    }

    /// Applies the rules separated by `|`, e.g. `required|min:3|unique:users,id,5`.
    ///
    /// The whole expression is parsed before any rule runs. All rules run even after
    /// a failure. Returns `true` if every rule passed.
    pub fn apply<'a>(
        &mut self,
        field: &str,
        value: impl Into<FieldValue<'a>>,
        rules: &str,
    ) -> Result<bool, RuleError> {
        let value = value.into();
        let specs = RuleSpec::parse_list(rules)?;
        let mut passed = true;
        for spec in &specs {
            passed &= self.check(field, &value, spec)?;
        }
        Ok(passed)
    }

    /// Applies the rules to the fields of a form. Missing fields are absent values.
    ///
    /// Every rule expression is parsed before any rule runs.
    pub fn validate_map(
        &mut self,
        data: &Map,
        rules: &[(&str, &str)],
    ) -> Result<bool, RuleError> {
        let specs = rules
            .iter()
            .map(|&(field, rules)| RuleSpec::parse_list(rules).map(|specs| (field, specs)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut passed = true;
        for (field, specs) in &specs {
            let value = data.get(*field).map(FieldValue::from).unwrap_or_default();
            for spec in specs {
                passed &= self.check(field, &value, spec)?;
            }
        }
        Ok(passed)
    }

    /// Returns `true` if any rule has failed.
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.failed_entries.is_empty()
    }

    /// Returns `true` if no rule has failed.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failed_entries.is_empty()
    }

    /// Returns the formatted messages in invocation order.
    #[inline]
    pub fn messages(&self) -> Vec<&str> {
        self.failed_entries
            .iter()
            .map(|entry| entry.message.as_str())
            .collect()
    }

    /// Returns the failed entries in invocation order.
    #[inline]
    pub fn entries(&self) -> &[FailedEntry] {
        &self.failed_entries
    }

    /// Returns `true` if the field has failed any rule.
    #[inline]
    pub fn contains_key(&self, field: &str) -> bool {
        self.failed_entries.iter().any(|entry| entry.field == field)
    }

    /// Returns the distinct names of the failed fields in invocation order.
    pub fn invalid_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        for entry in &self.failed_entries {
            let field = entry.field.as_str();
            if !params.contains(&field) {
                params.push(field);
            }
        }
        params
    }

    /// Consumes the validator and returns the formatted messages.
    #[inline]
    pub fn into_messages(self) -> Vec<String> {
        self.failed_entries
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }

    /// Consumes the validator and returns a JSON object
    /// mapping each failed field to its list of messages.
    #[must_use]
    pub fn into_map(self) -> Map {
        let mut map = Map::new();
        for FailedEntry {
            field,
            rule,
            message,
        } in self.failed_entries
        {
            tracing::warn!(rule = rule.as_str(), "invalid value for `{field}`: {message}");
            if let Some(messages) = map
                .entry(field)
                .or_insert_with(|| Vec::<crate::JsonValue>::new().into())
                .as_array_mut()
            {
                messages.push(message.into());
            }
        }
        map
    }

    /// Runs a format check which lets empty values pass.
    fn check_format<V>(
        &mut self,
        field: &str,
        value: FieldValue<'_>,
        rule: Rule,
        validator: &V,
    ) -> bool
    where
        V: FormatValidator<str>,
    {
        if rule.allows_empty() && value.is_empty() {
            return true;
        }
        match validator.validate(&value.as_text()) {
            Ok(()) => true,
            Err(err) => {
                let reason: Error = err.into();
                tracing::debug!(field, rule = rule.as_str(), "value rejected: {reason}");
                self.record_fail(field, rule, MessageParam::Value(&value));
                false
            }
        }
    }

    /// Resolves, wraps and records the message for a failure.
    fn record_fail(&mut self, field: &str, rule: Rule, param: MessageParam<'_>) {
        let message = match self.messages.get(field, rule) {
            Some(message) => self.format.apply(message),
            None => self.format.apply(&default_message(field, rule, param)),
        };
        self.failed_entries.push(FailedEntry {
            field: field.to_owned(),
            rule,
            message,
        });
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("messages", &self.messages)
            .field("format", &self.format)
            .field("row_counter", &self.row_counter.is_some())
            .field("failed_entries", &self.failed_entries)
            .finish()
    }
}

impl fmt::Display for Validator {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("\n"))
    }
}
