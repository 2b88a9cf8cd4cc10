//! yumemaga CLI library.
//!
//! Command-line access to the progress service: running it over a local
//! data directory, seeding it, and reading or mutating scopes through the
//! HTTP client.

pub mod cli;
pub mod commands;
pub mod config;
