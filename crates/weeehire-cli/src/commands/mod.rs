//! CLI command implementations

pub mod invite;
pub mod recruiters;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};
use weeehire_core::config::WeeehireConfig;
use weeehire_ldap::{CacheStore, DirectoryGateway, LdapConfig};

/// Context passed to all commands
pub struct CommandContext {
    pub config: WeeehireConfig,
    pub cache: Arc<dyn CacheStore>,
    pub json: bool,
}

impl CommandContext {
    /// Open a directory session for one command
    pub fn gateway(&self) -> Result<DirectoryGateway> {
        let ldap_config = LdapConfig::from_config(&self.config);
        debug!(config = ?ldap_config, "Opening directory session");

        let gateway = DirectoryGateway::connect(ldap_config, Some(self.cache.clone()))
            .with_context(|| format!("Cannot open LDAP session to {}", self.config.ldap.server_url))?;

        info!(
            url = %gateway.config().server_url,
            caching = gateway.caching_enabled(),
            "Directory session opened"
        );
        Ok(gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weeehire_ldap::MemoryCache;

    #[test]
    fn test_gateway_reports_invalid_config() {
        let ctx = CommandContext {
            config: WeeehireConfig::default(),
            cache: Arc::new(MemoryCache::new()),
            json: false,
        };

        let err = ctx.gateway().err().unwrap();
        assert!(err.to_string().starts_with("Cannot open LDAP session"));
    }
}
