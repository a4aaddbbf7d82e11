//! Pluggable configuration sources for agent settings.
//!
//! ```rust,no_run
//! use mqmanus::config::{ConfigBuilder, MemoryConfigProvider};
//! use mqmanus::AgentConfig;
//!
//! # async fn example() -> mqmanus::Result<()> {
//! let provider = ConfigBuilder::new()
//!     .env_with_prefix("MQMANUS_")
//!     .memory(MemoryConfigProvider::new().value("agent.max_steps", "20"))
//!     .build();
//! let config = AgentConfig::from_provider(&provider).await?;
//! # Ok(())
//! # }
//! ```

pub mod composite;
pub mod env;
pub mod memory;
pub mod provider;

pub use composite::CompositeConfigProvider;
pub use env::EnvConfigProvider;
pub use memory::MemoryConfigProvider;
pub use provider::{ConfigProvider, ConfigProviderExt};

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required key not found
    #[error("Key not found: {key}")]
    NotFound { key: String },

    /// Value present but unusable
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Environment variable could not be read
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fluent builder for a [`CompositeConfigProvider`].
///
/// Providers added first take priority.
#[derive(Default)]
pub struct ConfigBuilder {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unprefixed environment provider
    pub fn env(mut self) -> Self {
        self.providers.push(Box::new(EnvConfigProvider::new()));
        self
    }

    pub fn env_with_prefix(mut self, prefix: &str) -> Self {
        self.providers
            .push(Box::new(EnvConfigProvider::prefixed(prefix)));
        self
    }

    pub fn memory(mut self, provider: MemoryConfigProvider) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn provider(mut self, provider: Box<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> CompositeConfigProvider {
        self.providers
            .into_iter()
            .fold(CompositeConfigProvider::new(), CompositeConfigProvider::provider)
    }
}
