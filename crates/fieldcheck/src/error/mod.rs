//! Errors raised while loading configs and counting rows.
use crate::SharedString;
use std::{error, fmt, iter};

/// An error made of a message and a chain of causes.
#[derive(Debug)]
pub struct Error {
    /// Error message.
    message: SharedString,
    /// The cause of the error.
    source: Option<Box<Error>>,
}

impl Error {
    /// Creates a new instance with the supplied message.
    #[inline]
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new instance with the supplied message caused by `source`.
    #[inline]
    pub fn with_source(message: impl Into<SharedString>, source: impl Into<Error>) -> Self {
        Self::new(message).caused_by(source.into())
    }

    /// Returns a new instance with the supplied message caused by `self`.
    #[inline]
    pub fn wrap(self, message: impl Into<SharedString>) -> Self {
        Self::new(message).caused_by(self)
    }

    /// Returns the error message without its causes.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the direct cause.
    #[inline]
    pub fn source(&self) -> Option<&Error> {
        self.source.as_deref()
    }

    /// Iterates over `self` followed by every cause down to the root.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        iter::successors(Some(self), |err| err.source())
    }

    /// Returns the innermost cause, or `self` if there is none.
    pub fn root_cause(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    fn caused_by(mut self, source: Error) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    fn from_dyn(err: &(dyn error::Error + 'static)) -> Self {
        let converted = Self::new(err.to_string());
        match err.source() {
            Some(source) => converted.caused_by(Self::from_dyn(source)),
            None => converted,
        }
    }
}

impl<E: error::Error + 'static> From<E> for Error {
    #[inline]
    fn from(err: E) -> Self {
        Self::from_dyn(&err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages = self.chain().map(Error::message);
        if let Some(message) = messages.next() {
            f.write_str(message)?;
        }
        messages.try_for_each(|message| write!(f, ": {message}"))
    }
}

/// Returns early with an [`Error`](crate::error::Error) built from a format string.
#[macro_export]
macro_rules! bail {
    ($fmt:expr $(, $args:expr)* $(,)?) => {
        return Err($crate::error::Error::new(format!($fmt $(, $args)*)).into())
    };
}
