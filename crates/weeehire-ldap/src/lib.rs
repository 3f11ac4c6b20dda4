//! Directory gateway for WEEEHire

pub mod cache;
pub mod error;
pub mod ldap;

pub use cache::{CacheStore, Clock, ManualClock, MemoryCache, SystemClock};
pub use error::{LdapError, LdapResult};
pub use ldap::{
    normalize, AttributeValue, Directory, DirectoryEntry, DirectoryGateway, InviteRecord,
    LdapConfig, LdapDirectory,
};

use rand::Rng;

/// Random bytes in an invite code
pub const INVITE_CODE_BYTES: usize = 12;

/// Generate a new invite code: 12 bytes from the thread-local CSPRNG,
/// as 24 uppercase hex characters
pub fn generate_invite_code() -> String {
    let mut bytes = [0u8; INVITE_CODE_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode_upper(bytes)
}
