//! In-memory directory for tests

use crate::error::{LdapError, LdapResult};
use crate::ldap::directory::Directory;
use crate::ldap::normalization::normalize;
use crate::ldap::types::{DirectoryEntry, LdapConfig};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::sync::Arc;

type Search = (String, String, Vec<String>);
type Added = (String, Vec<(String, Vec<String>)>);

#[derive(Default)]
struct FakeState {
    entries: Vec<DirectoryEntry>,
    searches: Vec<Search>,
    added: Vec<Added>,
    fail_search: bool,
    fail_add: bool,
}

/// Directory answering searches from a fixed entry list and recording
/// every request. Clones share state.
#[derive(Clone, Default)]
pub(crate) struct FakeDirectory {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDirectory {
    pub fn with_entries(entries: Vec<DirectoryEntry>) -> Self {
        let directory = Self::default();
        directory.set_entries(entries);
        directory
    }

    pub fn set_entries(&self, entries: Vec<DirectoryEntry>) {
        self.state.lock().entries = entries;
    }

    pub fn fail_search(&self, fail: bool) {
        self.state.lock().fail_search = fail;
    }

    pub fn fail_add(&self, fail: bool) {
        self.state.lock().fail_add = fail;
    }

    pub fn searches(&self) -> usize {
        self.state.lock().searches.len()
    }

    pub fn last_search(&self) -> Option<Search> {
        self.state.lock().searches.last().cloned()
    }

    pub fn added(&self) -> Vec<Added> {
        self.state.lock().added.clone()
    }
}

impl Directory for FakeDirectory {
    fn search(
        &mut self,
        base_dn: &str,
        filter: &str,
        attributes: &[&str],
    ) -> LdapResult<Vec<DirectoryEntry>> {
        let mut state = self.state.lock();
        if state.fail_search {
            return Err(LdapError::DirectoryQueryError {
                base_dn: base_dn.to_string(),
                message: "search failed: connection reset".to_string(),
            });
        }

        state.searches.push((
            base_dn.to_string(),
            filter.to_string(),
            attributes.iter().map(|a| a.to_string()).collect(),
        ));
        Ok(state.entries.clone())
    }

    fn add(&mut self, dn: &str, attributes: Vec<(&str, Vec<String>)>) -> LdapResult<()> {
        let mut state = self.state.lock();
        if state.fail_add {
            return Err(LdapError::DirectoryWriteError {
                dn: dn.to_string(),
                message: "add rejected: entryAlreadyExists".to_string(),
            });
        }

        state.added.push((
            dn.to_string(),
            attributes
                .into_iter()
                .map(|(name, values)| (name.to_string(), values))
                .collect(),
        ));
        Ok(())
    }
}

/// A recruiter entry shaped the way directory clients return it
pub(crate) fn recruiter_entry(cn: Option<&str>, telegram: Option<&str>) -> DirectoryEntry {
    let mut raw = Map::new();
    raw.insert("dn".to_string(), Value::Null);
    raw.insert("count".to_string(), json!(0));
    if let Some(cn) = cn {
        raw.insert("cn".to_string(), json!({"count": 1, "0": cn}));
    }
    if let Some(telegram) = telegram {
        raw.insert("telegramnickname".to_string(), json!([telegram]));
    }
    normalize(&raw)
}

pub(crate) fn test_config() -> LdapConfig {
    LdapConfig {
        server_url: "ldap://localhost:389".to_string(),
        start_tls: true,
        skip_tls_verify: false,
        bind_dn: "cn=weeehire,ou=Services,dc=example,dc=com".to_string(),
        bind_password: "hunter2".to_string(),
        users_dn: "ou=People,dc=example,dc=com".to_string(),
        invites_dn: "ou=Invites,dc=example,dc=com".to_string(),
        recruiters_filter: "(objectClass=weeeOpenPerson)".to_string(),
        timeout_seconds: 10,
        cache_ttl_seconds: 3600,
        invite_link_prefix: "https://example.com/register?invite=".to_string(),
    }
}
