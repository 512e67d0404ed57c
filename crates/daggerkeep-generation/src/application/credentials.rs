//! Credential store handlers.
//!
//! Keys are stored whole under [`API_KEYS_KEY`]. Nothing here returns a key
//! to a caller outside this crate except [`load_api_keys`], which the
//! generation route uses to pick a provider.

use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::KeyValueStore;
use tracing::info;

use crate::domain::credentials::{API_KEYS_KEY, ApiKeys, Provider};
use crate::domain::ports::TextGenerator;
use crate::domain::prompt::CONNECTION_TEST_PROMPT;

/// Loads the stored API keys; empty when none were ever saved.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if reading fails or the stored value
/// is unreadable.
pub async fn load_api_keys(store: &dyn KeyValueStore) -> Result<ApiKeys, DomainError> {
    match store.get(API_KEYS_KEY).await? {
        Some(json) => serde_json::from_value(json).map_err(|e| {
            DomainError::Infrastructure(format!("api key deserialization failed: {e}"))
        }),
        None => Ok(ApiKeys::default()),
    }
}

async fn store_api_keys(store: &dyn KeyValueStore, keys: &ApiKeys) -> Result<(), DomainError> {
    let json = serde_json::to_value(keys)
        .map_err(|e| DomainError::Infrastructure(format!("api key serialization failed: {e}")))?;
    store.set(API_KEYS_KEY, json).await
}

/// Saves the key for `provider`, replacing any previous one.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the key is blank, or
/// `DomainError::Infrastructure` if storage fails.
pub async fn save_api_key(
    provider: Provider,
    key: &str,
    store: &dyn KeyValueStore,
) -> Result<ApiKeys, DomainError> {
    let mut keys = load_api_keys(store).await?;
    keys.set(provider, key)?;
    store_api_keys(store, &keys).await?;
    info!(provider = %provider, "API key saved");
    Ok(keys)
}

/// Removes the key for `provider`. Removing an absent key succeeds.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if storage fails.
pub async fn remove_api_key(
    provider: Provider,
    store: &dyn KeyValueStore,
) -> Result<ApiKeys, DomainError> {
    let mut keys = load_api_keys(store).await?;
    keys.remove(provider);
    store_api_keys(store, &keys).await?;
    info!(provider = %provider, "API key removed");
    Ok(keys)
}

/// Sends a short test prompt with `provider`'s stored key and returns the
/// reply.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `provider` has no key, or
/// `DomainError::Generation` if the call fails or the reply is empty.
pub async fn test_connection(
    provider: Provider,
    store: &dyn KeyValueStore,
    generator: &dyn TextGenerator,
) -> Result<String, DomainError> {
    let keys = load_api_keys(store).await?;
    let key = keys
        .get(provider)
        .ok_or_else(|| DomainError::Validation(format!("no {provider} API key is configured")))?;

    let reply = generator.generate(provider, key, CONNECTION_TEST_PROMPT).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(DomainError::Generation(format!(
            "{provider} returned an empty response"
        )));
    }
    Ok(reply.to_owned())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use daggerkeep_test_support::{FailingKeyValueStore, InMemoryKeyValueStore};

    use super::*;

    struct CannedGenerator {
        reply: &'static str,
        calls: Mutex<Vec<(Provider, String, String)>>,
    }

    impl CannedGenerator {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            provider: Provider,
            api_key: &str,
            prompt: &str,
        ) -> Result<String, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((provider, api_key.to_owned(), prompt.to_owned()));
            Ok(self.reply.to_owned())
        }
    }

    #[tokio::test]
    async fn test_save_and_remove_api_key() {
        let store = InMemoryKeyValueStore::new();

        save_api_key(Provider::Anthropic, " sk-ant ", &store).await.unwrap();
        save_api_key(Provider::OpenAi, "sk-openai", &store).await.unwrap();
        let keys = remove_api_key(Provider::Anthropic, &store).await.unwrap();

        assert_eq!(keys.configured(), vec![Provider::OpenAi]);
        assert_eq!(load_api_keys(&store).await.unwrap(), keys);
    }

    #[tokio::test]
    async fn test_save_blank_key_is_rejected_and_not_stored() {
        let store = InMemoryKeyValueStore::new();

        let result = save_api_key(Provider::OpenAi, "", &store).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.snapshot(API_KEYS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_save_propagates_store_failure() {
        let result = save_api_key(Provider::OpenAi, "sk", &FailingKeyValueStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_connection_sends_test_prompt_with_stored_key() {
        // Arrange
        let store = InMemoryKeyValueStore::new();
        save_api_key(Provider::OpenAi, "sk-openai", &store).await.unwrap();
        let generator = CannedGenerator::new("Hello! API connection successful.");

        // Act
        let reply = test_connection(Provider::OpenAi, &store, &generator)
            .await
            .unwrap();

        // Assert
        assert_eq!(reply, "Hello! API connection successful.");
        let calls = generator.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![(
                Provider::OpenAi,
                "sk-openai".to_owned(),
                CONNECTION_TEST_PROMPT.to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_connection_empty_reply_fails() {
        let store = InMemoryKeyValueStore::new();
        save_api_key(Provider::Anthropic, "sk-ant", &store).await.unwrap();
        let generator = CannedGenerator::new("   ");

        let result = test_connection(Provider::Anthropic, &store, &generator).await;

        assert!(matches!(result, Err(DomainError::Generation(_))));
    }

    #[tokio::test]
    async fn test_connection_without_key_does_not_call_provider() {
        let store = InMemoryKeyValueStore::new();
        let generator = CannedGenerator::new("hi");

        let result = test_connection(Provider::Anthropic, &store, &generator).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(generator.calls.lock().unwrap().is_empty());
    }
}
