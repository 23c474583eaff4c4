//! Headless frame loop around the `tetrion` engine.

#[macro_use]
extern crate tracing;

pub mod config;
pub use config::*;

pub mod script;
pub use script::*;

pub mod session;
pub use session::*;
