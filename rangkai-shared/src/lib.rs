//! # Rangkai Edu Shared Library
//!
//! Configuration loading and database bootstrap shared by the Rangkai Edu
//! backend binaries.
//!
//! ## Module Organization
//!
//! - `config`: Database configuration from environment variables and `.env`
//! - `db`: PostgreSQL connection pool

pub mod config;
pub mod db;

/// Current version of the Rangkai Edu shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
