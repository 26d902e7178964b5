//! Helper utilities.
mod server_vars;

pub use server_vars::ServerVars;
