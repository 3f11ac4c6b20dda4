//! Directory connection
//!
//! Opens, upgrades and binds a synchronous `ldap3` connection, and exposes
//! the two requests the gateway issues after binding: subtree search and
//! add.

use crate::error::{LdapError, LdapResult};
use crate::ldap::normalization::normalize_search_entry;
use crate::ldap::types::{DirectoryEntry, LdapConfig};
use ldap3::{LdapConn, LdapConnSettings, Scope, SearchEntry};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// An authenticated directory session
pub trait Directory {
    /// Subtree search under `base_dn`, returning normalized entries
    fn search(
        &mut self,
        base_dn: &str,
        filter: &str,
        attributes: &[&str],
    ) -> LdapResult<Vec<DirectoryEntry>>;

    /// Create a new entry
    fn add(&mut self, dn: &str, attributes: Vec<(&str, Vec<String>)>) -> LdapResult<()>;
}

/// Directory session backed by `ldap3`
pub struct LdapDirectory {
    conn: LdapConn,
    server_url: String,
}

impl LdapDirectory {
    /// Connect, negotiate STARTTLS if configured, and bind
    pub fn connect(config: &LdapConfig) -> LdapResult<Self> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(config.timeout_seconds))
            .set_starttls(config.start_tls)
            .set_no_tls_verify(config.skip_tls_verify);

        debug!(
            url = %config.server_url,
            start_tls = config.start_tls,
            "Connecting to LDAP server"
        );

        let mut conn = LdapConn::with_settings(settings, &config.server_url).map_err(|e| {
            LdapError::ConnectionError {
                url: config.server_url.clone(),
                message: if config.start_tls {
                    format!("connection or STARTTLS failed: {}", e)
                } else {
                    e.to_string()
                },
            }
        })?;

        debug!(bind_dn = %config.bind_dn, "Performing LDAP bind");

        let result = conn
            .simple_bind(&config.bind_dn, &config.bind_password)
            .map_err(|e| LdapError::ConnectionError {
                url: config.server_url.clone(),
                message: format!("bind request failed: {}", e),
            })?;

        if result.rc != 0 {
            let _ = conn.unbind();
            return Err(LdapError::AuthenticationError {
                bind_dn: config.bind_dn.clone(),
                code: result.rc,
            });
        }

        info!(url = %config.server_url, "LDAP connection established");

        Ok(Self {
            conn,
            server_url: config.server_url.clone(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

impl Directory for LdapDirectory {
    fn search(
        &mut self,
        base_dn: &str,
        filter: &str,
        attributes: &[&str],
    ) -> LdapResult<Vec<DirectoryEntry>> {
        debug!(base_dn, filter, "Searching LDAP");

        let query_error = |message: String| LdapError::DirectoryQueryError {
            base_dn: base_dn.to_string(),
            message,
        };

        let (rs, _res) = self
            .conn
            .search(base_dn, Scope::Subtree, filter, attributes.to_vec())
            .map_err(|e| query_error(format!("search failed: {}", e)))?
            .success()
            .map_err(|e| query_error(format!("search error: {}", e)))?;

        debug!("Found {} entries", rs.len());

        Ok(rs
            .into_iter()
            .map(|result| normalize_search_entry(&SearchEntry::construct(result)))
            .collect())
    }

    fn add(&mut self, dn: &str, attributes: Vec<(&str, Vec<String>)>) -> LdapResult<()> {
        let write_error = |message: String| LdapError::DirectoryWriteError {
            dn: dn.to_string(),
            message,
        };

        let attrs: Vec<(&str, HashSet<&str>)> = attributes
            .iter()
            .map(|(name, values)| (*name, values.iter().map(String::as_str).collect()))
            .collect();

        self.conn
            .add(dn, attrs)
            .map_err(|e| write_error(format!("add failed: {}", e)))?
            .success()
            .map_err(|e| write_error(format!("add rejected: {}", e)))?;

        Ok(())
    }
}

impl Drop for LdapDirectory {
    fn drop(&mut self) {
        let _ = self.conn.unbind();
    }
}
