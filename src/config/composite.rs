//! Composite configuration provider
//!
//! Chains providers; earlier providers have higher priority.

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider at the lowest priority
    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for CompositeConfigProvider {
    fn name(&self) -> &str {
        "composite"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        for provider in &self.providers {
            if let Some(value) = provider.get_raw(key).await? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl std::fmt::Debug for CompositeConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeConfigProvider")
            .field("providers", &self.provider_names())
            .finish()
    }
}
