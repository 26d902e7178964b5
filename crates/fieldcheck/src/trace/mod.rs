//! Tracing subscriber setup.
//!
//! The crate itself only emits [`tracing`] events; installing a subscriber is left
//! to the application. With the `tracing-subscriber` feature enabled,
//! [`init_subscriber`] provides the default one.

#[cfg(feature = "tracing-subscriber")]
mod subscriber;

#[cfg(feature = "tracing-subscriber")]
pub use subscriber::init_subscriber;
