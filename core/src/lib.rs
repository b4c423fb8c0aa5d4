//! Core of taskcast: turns spreadsheet rows into chat digests.
//!
//! The pipeline is `classify` (rows to [`task::Buckets`], names resolved by
//! [`resolver::NameResolver`]), `digest` (buckets to lines) and `chunk`
//! (lines to bounded messages). `engine` runs it against the I/O
//! collaborators declared in `service`.

pub mod api;
pub mod chunk;
pub mod classify;
pub mod config;
pub mod context;
pub mod digest;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod service;
pub mod task;
