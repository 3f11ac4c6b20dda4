//! LDAP types and configuration
//!
//! Covers:
//! - Gateway configuration
//! - Normalized directory entries
//! - Invite entries

use crate::error::{LdapError, LdapResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use weeehire_core::config::WeeehireConfig;
use weeehire_core::utils::polito_mail;
use weeehire_core::Candidate;

// ============================================================================
// LDAP Configuration
// ============================================================================

/// Directory gateway configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LdapConfig {
    /// LDAP server URL (ldap:// or ldaps://)
    /// Example: "ldap://ldap.example.com:389" or "ldaps://ldap.example.com:636"
    pub server_url: String,

    /// Use STARTTLS for connection upgrade
    #[serde(default = "default_start_tls")]
    pub start_tls: bool,

    /// Skip TLS certificate verification (not recommended for production)
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Bind DN (service account)
    /// Example: "cn=weeehire,ou=Services,dc=example,dc=com"
    pub bind_dn: String,

    /// Bind password
    pub bind_password: String,

    /// Base DN searched for recruiters
    /// Example: "ou=People,dc=example,dc=com"
    pub users_dn: String,

    /// Base DN under which invite entries are created
    /// Example: "ou=Invites,dc=example,dc=com"
    pub invites_dn: String,

    /// Filter selecting the users shown as recruiters
    pub recruiters_filter: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Lifetime of the cached recruiter list (seconds)
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Prefix the invite code is appended to
    pub invite_link_prefix: String,
}

fn default_start_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

fn default_cache_ttl() -> u64 {
    weeehire_core::DEFAULT_CACHE_TTL_SECONDS
}

impl std::fmt::Debug for LdapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LdapConfig")
            .field("server_url", &self.server_url)
            .field("start_tls", &self.start_tls)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"<redacted>")
            .field("users_dn", &self.users_dn)
            .field("invites_dn", &self.invites_dn)
            .field("recruiters_filter", &self.recruiters_filter)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("invite_link_prefix", &self.invite_link_prefix)
            .finish()
    }
}

impl LdapConfig {
    /// Build the gateway configuration from the application configuration
    pub fn from_config(config: &WeeehireConfig) -> Self {
        let ldap = &config.ldap;
        Self {
            server_url: ldap.server_url.clone(),
            start_tls: ldap.start_tls,
            skip_tls_verify: ldap.skip_tls_verify,
            bind_dn: ldap.bind_dn.clone(),
            bind_password: ldap.bind_password.clone(),
            users_dn: ldap.users_dn.clone(),
            invites_dn: ldap.invites_dn.clone(),
            recruiters_filter: ldap.recruiters_filter.clone(),
            timeout_seconds: ldap.timeout_seconds,
            cache_ttl_seconds: config.cache.ttl_seconds,
            invite_link_prefix: config.invite.link_prefix.clone(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> LdapResult<()> {
        if self.server_url.is_empty() {
            return Err(LdapError::ConfigError("Server URL is required".to_string()));
        }

        if !self.server_url.starts_with("ldap://") && !self.server_url.starts_with("ldaps://") {
            return Err(LdapError::ConfigError(
                "Server URL must start with ldap:// or ldaps://".to_string(),
            ));
        }

        if self.start_tls && self.server_url.starts_with("ldaps://") {
            return Err(LdapError::ConfigError(
                "STARTTLS cannot be used on an ldaps:// connection".to_string(),
            ));
        }

        if self.bind_dn.is_empty() {
            return Err(LdapError::ConfigError("Bind DN is required".to_string()));
        }

        if self.users_dn.is_empty() {
            return Err(LdapError::ConfigError("Users base DN is required".to_string()));
        }

        if self.invites_dn.is_empty() {
            return Err(LdapError::ConfigError("Invites base DN is required".to_string()));
        }

        if self.recruiters_filter.is_empty() {
            return Err(LdapError::ConfigError("Recruiters filter is required".to_string()));
        }

        if self.invite_link_prefix.is_empty() {
            return Err(LdapError::ConfigError(
                "Invite link prefix is required".to_string(),
            ));
        }

        url::Url::parse(&self.invite_link_prefix).map_err(|e| {
            LdapError::ConfigError(format!("Invite link prefix is not a valid URL: {}", e))
        })?;

        Ok(())
    }
}

// ============================================================================
// Directory Entries
// ============================================================================

/// Attributes that legitimately carry more than one value.
/// Everything else is reduced to its first value.
pub const MULTIVALUED_ATTRIBUTES: &[&str] = &["memberof", "sshpublickey", "weeelabnickname"];

/// Whether `attribute` (lower-cased) keeps all of its values
pub fn is_multivalued(attribute: &str) -> bool {
    MULTIVALUED_ATTRIBUTES.contains(&attribute)
}

/// Value of a normalized attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    Multi(Vec<String>),
}

impl AttributeValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            AttributeValue::Single(value) => Some(value),
            AttributeValue::Multi(values) => values.first().map(String::as_str),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            AttributeValue::Single(value) => vec![value.as_str()],
            AttributeValue::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// A directory entry keyed by lower-cased attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    attributes: BTreeMap<String, AttributeValue>,
}

impl DirectoryEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing any previous value under the same
    /// (case-insensitive) name
    pub fn insert(&mut self, attribute: &str, value: AttributeValue) {
        self.attributes.insert(attribute.to_lowercase(), value);
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.attributes.get(&attribute.to_lowercase())
    }

    /// First value of an attribute
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).and_then(AttributeValue::first)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================================
// Invites
// ============================================================================

/// Object classes every invite entry carries
pub const INVITE_OBJECT_CLASSES: [&str; 5] = [
    "inviteCodeContainer",
    "schacLinkageIdentifiers",
    "schacPersonalCharacteristics",
    "telegramAccount",
    "weeeOpenPerson",
];

/// A one-time invitation, stored as `inviteCode=<code>,<invites DN>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteRecord {
    pub code: String,
    pub cn: String,
    pub given_name: String,
    pub surname: String,
    pub mail: String,
    pub matricola: String,
    pub degree_course: String,
}

impl InviteRecord {
    pub fn for_candidate(code: String, candidate: &Candidate) -> Self {
        Self {
            code,
            cn: candidate.full_name(),
            given_name: candidate.name.clone(),
            surname: candidate.surname.clone(),
            mail: polito_mail(&candidate.matricola),
            matricola: candidate.matricola.clone(),
            degree_course: candidate.degree_course.clone(),
        }
    }

    pub fn dn(&self, invites_dn: &str) -> String {
        format!("inviteCode={},{}", self.code, invites_dn)
    }

    /// Attributes sent with the add request
    pub fn attributes(&self) -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("cn", vec![self.cn.clone()]),
            (
                "objectClass",
                INVITE_OBJECT_CLASSES.iter().map(|c| c.to_string()).collect(),
            ),
            ("givenName", vec![self.given_name.clone()]),
            ("sn", vec![self.surname.clone()]),
            ("mail", vec![self.mail.clone()]),
            ("schacPersonalUniqueCode", vec![self.matricola.clone()]),
            ("degreeCourse", vec![self.degree_course.clone()]),
        ]
    }

    pub fn invite_url(&self, link_prefix: &str) -> String {
        format!("{}{}", link_prefix, self.code)
    }
}
