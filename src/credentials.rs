//! API credentials.
//!
//! Keys live in a local JSON file keyed by provider, each entry being the
//! extra headers that provider expects:
//!
//! ```json
//! { "rapidapi": { "x-rapidapi-key": "..." } }
//! ```
//!
//! `RAPIDAPI_KEY` from the environment (or `.env`) overrides the file.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

pub const RAPIDAPI: &str = "rapidapi";
pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
const RAPIDAPI_KEY_ENV: &str = "RAPIDAPI_KEY";

#[derive(Debug, Default)]
pub struct Credentials {
    providers: HashMap<String, BTreeMap<String, SecretString>>,
}

impl Credentials {
    /// Load credentials from `path`, then overlay environment variables.
    /// A missing file yields whatever the environment provides.
    pub fn load(path: &Path) -> Result<Self> {
        let creds = match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No credentials file");
                Self::default()
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        Ok(creds.with_env_overlay())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, BTreeMap<String, String>> = serde_json::from_str(text)?;
        let providers = raw
            .into_iter()
            .map(|(provider, keys)| {
                let keys = keys
                    .into_iter()
                    .map(|(name, value)| (name, SecretString::from(value)))
                    .collect();
                (provider, keys)
            })
            .collect();
        Ok(Self { providers })
    }

    pub fn with_env_overlay(mut self) -> Self {
        if let Ok(key) = std::env::var(RAPIDAPI_KEY_ENV) {
            self.insert(RAPIDAPI, RAPIDAPI_KEY_HEADER, key);
        }
        self
    }

    pub fn insert(&mut self, provider: &str, header: &str, value: String) {
        self.providers
            .entry(provider.to_string())
            .or_default()
            .insert(header.to_string(), SecretString::from(value));
    }

    /// Header name to secret value map for `provider`.
    pub fn keymap(&self, provider: &str) -> Result<&BTreeMap<String, SecretString>> {
        match self.providers.get(provider) {
            Some(keys) if !keys.is_empty() => Ok(keys),
            _ => Err(Error::InvalidProvider(provider.to_string())),
        }
    }

    /// Exposed `(header, value)` pairs, for building request headers.
    pub fn exposed_headers(&self, provider: &str) -> Result<Vec<(&str, &str)>> {
        Ok(self
            .keymap(provider)?
            .iter()
            .map(|(name, value)| (name.as_str(), value.expose_secret()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_for_known_provider() {
        let creds = Credentials::from_json(r#"{"rapidapi": {"x-rapidapi-key": "abc"}}"#).unwrap();
        let headers = creds.exposed_headers("rapidapi").unwrap();
        assert_eq!(headers, vec![("x-rapidapi-key", "abc")]);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let creds = Credentials::from_json(r#"{"rapidapi": {"x-rapidapi-key": "abc"}}"#).unwrap();
        let err = creds.keymap("espn").unwrap_err();
        assert!(matches!(err, Error::InvalidProvider(p) if p == "espn"));
    }

    #[test]
    fn test_empty_entry_is_rejected() {
        let creds = Credentials::from_json(r#"{"rapidapi": {}}"#).unwrap();
        assert!(creds.keymap("rapidapi").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let creds = Credentials::from_json(r#"{"rapidapi": {"x-rapidapi-key": "s3cret"}}"#).unwrap();
        assert!(!format!("{creds:?}").contains("s3cret"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let creds = Credentials::load(&dir.path().join("api_creds.json")).unwrap();
        // Only the environment could have contributed anything.
        if std::env::var(RAPIDAPI_KEY_ENV).is_err() {
            assert!(creds.keymap(RAPIDAPI).is_err());
        }
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_creds.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Credentials::load(&path), Err(Error::Json(_))));
    }
}
