//! Directory gateway error types

use thiserror::Error;

/// Result type for directory operations
pub type LdapResult<T> = Result<T, LdapError>;

/// Directory-related errors
///
/// Messages name the operation and its target, never the bind password.
#[derive(Error, Debug)]
pub enum LdapError {
    #[error("Cannot connect to LDAP server {url}: {message}")]
    ConnectionError { url: String, message: String },

    #[error("Bind with LDAP server failed for {bind_dn} (code {code})")]
    AuthenticationError { bind_dn: String, code: u32 },

    #[error("Cannot search {base_dn}: {message}")]
    DirectoryQueryError { base_dn: String, message: String },

    #[error("Cannot create entry {dn}: {message}")]
    DirectoryWriteError { dn: String, message: String },

    #[error("Invalid LDAP configuration: {0}")]
    ConfigError(String),
}

impl LdapError {
    pub fn code(&self) -> &'static str {
        match self {
            LdapError::ConnectionError { .. } => "ConnectionError",
            LdapError::AuthenticationError { .. } => "AuthenticationError",
            LdapError::DirectoryQueryError { .. } => "DirectoryQueryError",
            LdapError::DirectoryWriteError { .. } => "DirectoryWriteError",
            LdapError::ConfigError(_) => "ConfigError",
        }
    }
}
