//! LDAP directory module
//!
//! Provides:
//! - Connection, STARTTLS and bind lifecycle
//! - Cached recruiter listing
//! - Invite entry creation
//! - Normalization of raw directory records

mod client;
mod directory;
mod normalization;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::DirectoryGateway;
pub use directory::{Directory, LdapDirectory};
pub use normalization::{normalize, normalize_search_entry};
pub use types::*;
