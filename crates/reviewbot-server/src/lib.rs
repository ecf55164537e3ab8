//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod health;
mod pulls;
pub mod server;
mod stats;
mod teams;
mod users;

#[cfg(test)]
mod tests;

pub use errors::{Result, ServerError};
