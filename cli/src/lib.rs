//! taskcast-cli library: argument parsing and command handlers, exposed for tests.

pub mod app;
pub mod commands;
