//! AI providers and the credentials configured for them.

use std::fmt;
use std::str::FromStr;

use daggerkeep_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Key-value store key of the API key set.
pub const API_KEYS_KEY: &str = "api_keys";

/// A supported AI provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Anthropic Messages API.
    Anthropic,
    /// OpenAI Chat Completions API.
    OpenAi,
}

impl Provider {
    /// Every provider, most preferred first.
    pub const ALL: [Provider; 2] = [Provider::Anthropic, Provider::OpenAi];

    /// The provider's lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown provider: {s}")))
    }
}

/// At most one API key per provider.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    anthropic: Option<String>,
    openai: Option<String>,
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys")
            .field("anthropic", &self.anthropic.as_ref().map(|_| "<redacted>"))
            .field("openai", &self.openai.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiKeys {
    fn slot(&mut self, provider: Provider) -> &mut Option<String> {
        match provider {
            Provider::Anthropic => &mut self.anthropic,
            Provider::OpenAi => &mut self.openai,
        }
    }

    /// The key configured for `provider`.
    #[must_use]
    pub fn get(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Anthropic => self.anthropic.as_deref(),
            Provider::OpenAi => self.openai.as_deref(),
        }
    }

    /// Whether `provider` has a key.
    #[must_use]
    pub fn has_key(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }

    /// Stores a key, trimmed, replacing any previous key for `provider`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the key is blank.
    pub fn set(&mut self, provider: Provider, key: &str) -> Result<(), DomainError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::Validation(format!(
                "{provider} API key must not be empty"
            )));
        }
        *self.slot(provider) = Some(key.to_owned());
        Ok(())
    }

    /// Forgets the key for `provider`.
    pub fn remove(&mut self, provider: Provider) {
        *self.slot(provider) = None;
    }

    /// Providers with a key, most preferred first.
    #[must_use]
    pub fn configured(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.has_key(*p))
            .collect()
    }

    /// The provider to generate with: Anthropic when configured, otherwise
    /// OpenAI.
    #[must_use]
    pub fn preferred(&self) -> Option<Provider> {
        self.configured().first().copied()
    }

    /// The preferred provider and its key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no provider has a key.
    pub fn select(&self) -> Result<(Provider, String), DomainError> {
        self.preferred()
            .and_then(|p| self.get(p).map(|key| (p, key.to_owned())))
            .ok_or_else(|| {
                DomainError::Validation(
                    "no AI provider API key is configured; add one in settings".to_owned(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_preferred_when_both_configured() {
        let mut keys = ApiKeys::default();
        keys.set(Provider::OpenAi, "sk-openai").unwrap();
        keys.set(Provider::Anthropic, "sk-ant").unwrap();

        let (provider, key) = keys.select().unwrap();

        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(key, "sk-ant");
    }

    #[test]
    fn test_openai_used_when_only_key() {
        let mut keys = ApiKeys::default();
        keys.set(Provider::OpenAi, "  sk-openai  ").unwrap();

        assert_eq!(keys.preferred(), Some(Provider::OpenAi));
        assert_eq!(keys.get(Provider::OpenAi), Some("sk-openai"));
    }

    #[test]
    fn test_select_without_keys_is_validation_error() {
        let keys = ApiKeys::default();

        assert!(matches!(keys.select(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let mut keys = ApiKeys::default();

        assert!(keys.set(Provider::Anthropic, "   ").is_err());
        assert!(!keys.has_key(Provider::Anthropic));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let mut keys = ApiKeys::default();
        keys.set(Provider::Anthropic, "sk-ant-secret").unwrap();

        let debug = format!("{keys:?}");

        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_provider_names_round_trip() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(
            serde_json::to_value(Provider::OpenAi).unwrap(),
            serde_json::json!("openai")
        );
        assert!("gemini".parse::<Provider>().is_err());
    }
}
