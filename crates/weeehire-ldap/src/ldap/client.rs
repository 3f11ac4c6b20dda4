//! Directory gateway
//!
//! Lists recruiters (cached) and issues invite codes for accepted
//! candidates. One gateway is built per request and dropped with it.

use crate::cache::CacheStore;
use crate::error::LdapResult;
use crate::generate_invite_code;
use crate::ldap::directory::{Directory, LdapDirectory};
use crate::ldap::types::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use weeehire_core::{Candidate, Recruiter, RECRUITERS_CACHE_KEY};

/// Attribute holding the recruiter display name
const NAME_ATTRIBUTE: &str = "cn";

/// Attribute holding the recruiter Telegram nickname
const TELEGRAM_ATTRIBUTE: &str = "telegramNickname";

/// Gateway between the application and the directory
pub struct DirectoryGateway<D: Directory = LdapDirectory> {
    directory: D,
    config: LdapConfig,
    cache: Option<Arc<dyn CacheStore>>,
}

impl DirectoryGateway<LdapDirectory> {
    /// Connect and bind to the configured server.
    ///
    /// The cache is probed once here; if it is missing or unavailable the
    /// gateway reads from the directory on every call.
    pub fn connect(config: LdapConfig, cache: Option<Arc<dyn CacheStore>>) -> LdapResult<Self> {
        config.validate()?;
        let directory = LdapDirectory::connect(&config)?;
        Ok(Self::with_directory(directory, config, cache))
    }
}

impl<D: Directory> DirectoryGateway<D> {
    /// Wrap an already bound directory session
    pub fn with_directory(
        directory: D,
        config: LdapConfig,
        cache: Option<Arc<dyn CacheStore>>,
    ) -> Self {
        let cache = match cache {
            Some(cache) if cache.is_available() => Some(cache),
            _ => {
                warn!("Shared cache is not available, recruiters will be read from LDAP on every request");
                None
            }
        };

        Self {
            directory,
            config,
            cache,
        }
    }

    pub fn config(&self) -> &LdapConfig {
        &self.config
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Recruiters sorted by name, case-insensitively
    pub fn list_recruiters(&mut self) -> LdapResult<Vec<Recruiter>> {
        if let Some(recruiters) = self.get_cached_recruiters() {
            debug!("Found {} cached recruiters", recruiters.len());
            return Ok(recruiters);
        }

        let entries = self.directory.search(
            &self.config.users_dn,
            &self.config.recruiters_filter,
            &[NAME_ATTRIBUTE, TELEGRAM_ATTRIBUTE],
        )?;

        // An empty answer is never cached
        if entries.is_empty() {
            debug!("No recruiters found");
            return Ok(Vec::new());
        }

        let recruiters = collect_recruiters(&entries);
        self.cache_recruiters(&recruiters);

        Ok(recruiters)
    }

    /// Create an invite entry for `candidate` and return its URL.
    ///
    /// Every call creates a new entry with a fresh code.
    pub fn create_invite(&mut self, candidate: &Candidate) -> LdapResult<String> {
        let record = InviteRecord::for_candidate(generate_invite_code(), candidate);
        let dn = record.dn(&self.config.invites_dn);

        debug!(dn = %dn, "Creating invite entry");
        self.directory.add(&dn, record.attributes())?;
        info!(dn = %dn, "Invite created");

        Ok(record.invite_url(&self.config.invite_link_prefix))
    }

    fn get_cached_recruiters(&self) -> Option<Vec<Recruiter>> {
        let value = self.cache.as_ref()?.fetch(RECRUITERS_CACHE_KEY)?;

        match serde_json::from_value(value) {
            Ok(recruiters) => Some(recruiters),
            Err(e) => {
                debug!("Ignoring undecodable cached recruiters: {}", e);
                None
            }
        }
    }

    fn cache_recruiters(&self, recruiters: &[Recruiter]) {
        let Some(cache) = &self.cache else {
            return;
        };

        match serde_json::to_value(recruiters) {
            Ok(value) => cache.store(
                RECRUITERS_CACHE_KEY,
                value,
                Duration::from_secs(self.config.cache_ttl_seconds),
            ),
            Err(e) => warn!("Cannot cache recruiters: {}", e),
        }
    }
}

/// Build the recruiter list from search results.
///
/// Recruiters are keyed by name: a later entry with the same name replaces
/// the earlier one. The result is ordered by lower-cased name, bytewise.
fn collect_recruiters(entries: &[DirectoryEntry]) -> Vec<Recruiter> {
    let mut recruiters: Vec<Recruiter> = Vec::with_capacity(entries.len());
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let recruiter = Recruiter::from_attributes(
            entry.first(NAME_ATTRIBUTE),
            entry.first(TELEGRAM_ATTRIBUTE),
        );

        let existing = by_name.get(&recruiter.name).copied();
        match existing {
            Some(index) => recruiters[index] = recruiter,
            None => {
                by_name.insert(recruiter.name.clone(), recruiters.len());
                recruiters.push(recruiter);
            }
        }
    }

    recruiters.sort_by_key(Recruiter::sort_key);
    recruiters
}
