//! WEEEHire Core Library
//!
//! Core types, configuration, and utilities shared by the WEEEHire crates.

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::WeeehireConfig;
pub use error::{Error, Result};
pub use types::{Candidate, Recruiter};

/// WEEEHire version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cache key under which the recruiter list is stored
pub const RECRUITERS_CACHE_KEY: &str = "recruiters";

/// Default lifetime of the cached recruiter list (1 hour)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;
