//! Recruiter types

use serde::{Deserialize, Serialize};

/// Shown in place of a recruiter without a `cn`
pub const MISSING_CN: &str = "⚠️ Missing cn";

/// Shown in place of a recruiter without a `telegramNickname`
pub const MISSING_TELEGRAM_NICKNAME: &str = "⚠️ Missing telegram nickname";

/// A recruiter as listed in the candidate page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruiter {
    /// Display name (`cn`)
    pub name: String,
    /// Telegram nickname, without the leading @
    pub telegram_nickname: String,
}

impl Recruiter {
    pub fn new(name: impl Into<String>, telegram_nickname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            telegram_nickname: telegram_nickname.into(),
        }
    }

    /// Build a recruiter from possibly missing attributes, filling in the
    /// placeholder text for whatever is absent.
    pub fn from_attributes(name: Option<&str>, telegram_nickname: Option<&str>) -> Self {
        Self {
            name: name.unwrap_or(MISSING_CN).to_string(),
            telegram_nickname: telegram_nickname
                .unwrap_or(MISSING_TELEGRAM_NICKNAME)
                .to_string(),
        }
    }

    /// Key used to order recruiters: name with ASCII letters lower-cased,
    /// compared bytewise. Non-ASCII letters are left as they are.
    pub fn sort_key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

impl std::fmt::Display for Recruiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (@{})", self.name, self.telegram_nickname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes() {
        let recruiter = Recruiter::from_attributes(None, None);
        assert_eq!(recruiter.name, "⚠️ Missing cn");
        assert_eq!(recruiter.telegram_nickname, "⚠️ Missing telegram nickname");

        let recruiter = Recruiter::from_attributes(Some("Alice"), None);
        assert_eq!(recruiter.name, "Alice");
        assert_eq!(recruiter.telegram_nickname, MISSING_TELEGRAM_NICKNAME);
    }

    #[test]
    fn test_sort_key_folds_ascii_only() {
        assert_eq!(Recruiter::new("Alice", "a").sort_key(), "alice");
        assert_eq!(Recruiter::new("Émile", "e").sort_key(), "Émile");
        assert!(Recruiter::new("Émile", "e").sort_key() < Recruiter::new("éa", "e").sort_key());
    }

    #[test]
    fn test_display() {
        let recruiter = Recruiter::new("Alice", "alice_tg");
        assert_eq!(recruiter.to_string(), "Alice (@alice_tg)");
    }
}
