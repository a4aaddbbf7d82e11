//! In-memory configuration provider, for tests and code-defined settings.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::ConfigResult;
use super::provider::ConfigProvider;

#[derive(Debug)]
pub struct MemoryConfigProvider {
    data: RwLock<HashMap<String, String>>,
    name: String,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            name: name.into(),
        }
    }

    pub fn from_data(data: HashMap<String, String>) -> Self {
        Self {
            data: RwLock::new(data),
            name: "memory".to_string(),
        }
    }

    /// Add a value during construction
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.get_mut().insert(key.into(), value.into());
        self
    }

    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.data.write().await.insert(key.into(), value.into());
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.data.write().await.remove(key).is_some()
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

impl Default for MemoryConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        Ok(self.data.read().await.get(key).cloned())
    }
}
