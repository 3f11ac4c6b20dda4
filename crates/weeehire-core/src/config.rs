//! Configuration for WEEEHire

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeehireConfig {
    #[serde(default)]
    pub ldap: LdapConfigSection,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub invite: InviteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WeeehireConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::InvalidConfig(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from `WEEEHIRE_*` variables resolved by `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("WEEEHIRE_LDAP_URL") {
            config.ldap.server_url = url;
        }
        if let Some(bind_dn) = lookup("WEEEHIRE_LDAP_BIND_DN") {
            config.ldap.bind_dn = bind_dn;
        }
        if let Some(password) = lookup("WEEEHIRE_LDAP_PASSWORD") {
            config.ldap.bind_password = password;
        }
        if let Some(dn) = lookup("WEEEHIRE_LDAP_USERS_DN") {
            config.ldap.users_dn = dn;
        }
        if let Some(dn) = lookup("WEEEHIRE_LDAP_INVITES_DN") {
            config.ldap.invites_dn = dn;
        }
        if let Some(start_tls) = lookup("WEEEHIRE_LDAP_STARTTLS") {
            config.ldap.start_tls = parse_bool(&start_tls, config.ldap.start_tls);
        }
        if let Some(filter) = lookup("WEEEHIRE_LDAP_SHOW_USERS_FILTER") {
            config.ldap.recruiters_filter = filter;
        }
        if let Some(timeout) = lookup("WEEEHIRE_LDAP_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                config.ldap.timeout_seconds = t;
            }
        }

        if let Some(enabled) = lookup("WEEEHIRE_CACHE_ENABLED") {
            config.cache.enabled = parse_bool(&enabled, config.cache.enabled);
        }
        if let Some(ttl) = lookup("WEEEHIRE_CACHE_TTL") {
            if let Ok(t) = ttl.parse() {
                config.cache.ttl_seconds = t;
            }
        }

        if let Some(link) = lookup("WEEEHIRE_INVITE_LINK") {
            config.invite.link_prefix = link;
        }

        if let Some(level) = lookup("WEEEHIRE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("WEEEHIRE_LOG_FORMAT") {
            config.logging.format = format;
        }

        config
    }
}

fn parse_bool(value: &str, fallback: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => fallback,
    }
}

/// Directory server section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdapConfigSection {
    /// LDAP server URL (ldap:// or ldaps://)
    #[serde(default = "default_ldap_url")]
    pub server_url: String,

    /// Upgrade the connection with STARTTLS before binding
    #[serde(default = "default_true")]
    pub start_tls: bool,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub skip_tls_verify: bool,

    #[serde(default)]
    pub bind_dn: String,

    #[serde(default)]
    pub bind_password: String,

    /// Base DN of the people subtree, searched for recruiters
    #[serde(default)]
    pub users_dn: String,

    /// Base DN under which invite entries are created
    #[serde(default)]
    pub invites_dn: String,

    /// Filter selecting the users shown as recruiters
    #[serde(default = "default_recruiters_filter")]
    pub recruiters_filter: String,

    /// Connection timeout in seconds
    #[serde(default = "default_ldap_timeout")]
    pub timeout_seconds: u64,
}

fn default_ldap_url() -> String {
    "ldap://localhost:389".to_string()
}

fn default_true() -> bool {
    true
}

fn default_recruiters_filter() -> String {
    "(&(objectClass=weeeOpenPerson)(!(nsAccountLock=true)))".to_string()
}

fn default_ldap_timeout() -> u64 {
    10
}

impl Default for LdapConfigSection {
    fn default() -> Self {
        Self {
            server_url: default_ldap_url(),
            start_tls: true,
            skip_tls_verify: false,
            bind_dn: String::new(),
            bind_password: String::new(),
            users_dn: String::new(),
            invites_dn: String::new(),
            recruiters_filter: default_recruiters_filter(),
            timeout_seconds: default_ldap_timeout(),
        }
    }
}

/// Shared cache section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether a shared cache is provided to the directory gateway
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Lifetime of the cached recruiter list
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

fn default_cache_ttl() -> u64 {
    crate::DEFAULT_CACHE_TTL_SECONDS
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_cache_ttl(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InviteConfig {
    /// Prefix the invite code is appended to, e.g. "https://example.com/register.php?invite="
    #[serde(default)]
    pub link_prefix: String,
}

impl InviteConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.link_prefix.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "Invite link prefix is required".into(),
            ));
        }
        url::Url::parse(&self.link_prefix).map_err(|e| {
            crate::Error::InvalidConfig(format!(
                "Invite link prefix is not a valid URL: {}",
                e
            ))
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = WeeehireConfig::default();
        assert!(config.ldap.start_tls);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_toml() {
        let config = WeeehireConfig::from_toml(
            r#"
            [ldap]
            server_url = "ldaps://ldap.example.com:636"
            start_tls = false
            bind_dn = "cn=weeehire,ou=Services,dc=example,dc=com"
            bind_password = "secret"
            users_dn = "ou=People,dc=example,dc=com"
            invites_dn = "ou=Invites,dc=example,dc=com"

            [invite]
            link_prefix = "https://example.com/register?invite="
            "#,
        )
        .unwrap();

        assert_eq!(config.ldap.server_url, "ldaps://ldap.example.com:636");
        assert!(!config.ldap.start_tls);
        assert_eq!(config.ldap.invites_dn, "ou=Invites,dc=example,dc=com");
        assert_eq!(config.ldap.recruiters_filter, default_recruiters_filter());
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert!(config.invite.validate().is_ok());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = WeeehireConfig::from_toml("[ldap\nserver_url = 1").unwrap_err();
        assert_eq!(err.code(), "InvalidConfig");
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = WeeehireConfig::from_file("/nonexistent/weeehire.toml").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
        assert_eq!(err.code(), "InternalError");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("WEEEHIRE_LDAP_URL", "ldap://dir.example.com"),
            ("WEEEHIRE_LDAP_STARTTLS", "false"),
            ("WEEEHIRE_LDAP_USERS_DN", "ou=People,dc=example,dc=com"),
            ("WEEEHIRE_CACHE_ENABLED", "0"),
            ("WEEEHIRE_CACHE_TTL", "60"),
            ("WEEEHIRE_INVITE_LINK", "https://example.com/?invite="),
        ]
        .into_iter()
        .collect();

        let config = WeeehireConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.ldap.server_url, "ldap://dir.example.com");
        assert!(!config.ldap.start_tls);
        assert_eq!(config.ldap.users_dn, "ou=People,dc=example,dc=com");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(config.invite.link_prefix, "https://example.com/?invite=");
    }

    #[test]
    fn test_unparseable_bool_keeps_default() {
        let config = WeeehireConfig::from_lookup(|k| {
            (k == "WEEEHIRE_LDAP_STARTTLS").then(|| "maybe".to_string())
        });
        assert!(config.ldap.start_tls);
    }

    #[test]
    fn test_invite_link_validation() {
        assert!(InviteConfig::default().validate().is_err());

        let invalid = InviteConfig {
            link_prefix: "not a url".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
