//! API key handling.
//!
//! The key is held for the lifetime of a client and is never printed: `Debug` is
//! redacted and there is no `Display` impl.

use crate::{Error, ErrorContext, Result};
use std::env;
use std::fmt;

/// Environment variable the binaries read the key from.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

#[cfg(feature = "keyring")]
const KEYRING_SERVICE: &str = "elevenlabs-tts";
#[cfg(feature = "keyring")]
const KEYRING_USER: &str = "api_key";

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "API key must not be empty",
                ErrorContext::new().with_field_path("api_key"),
            ));
        }
        Ok(Self(key))
    }

    /// Resolve the key from the keyring (when enabled) and then `ELEVENLABS_API_KEY`.
    pub fn from_env() -> Result<Self> {
        #[cfg(feature = "keyring")]
        if let Some(key) = Self::from_keyring() {
            return Ok(key);
        }

        match env::var(API_KEY_ENV) {
            Ok(key) => Self::new(key),
            Err(_) => Err(Error::configuration_with_context(
                format!("Please set {} in the environment or a .env file", API_KEY_ENV),
                ErrorContext::new().with_field_path(API_KEY_ENV),
            )),
        }
    }

    #[cfg(feature = "keyring")]
    fn from_keyring() -> Option<Self> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
        let key = entry.get_password().ok()?;
        Self::new(key).ok()
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("   ").is_err());
    }

    #[test]
    fn debug_never_shows_the_key() {
        let key = ApiKey::new("sk_live_secret").unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("secret"));
        assert_eq!(key.expose(), "sk_live_secret");
    }
}
