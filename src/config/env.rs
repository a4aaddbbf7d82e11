//! Environment variable configuration provider
//!
//! Keys map to variable names by upper-casing and replacing `.` with `_`,
//! so `agent.max_steps` with prefix `MQMANUS_` reads `MQMANUS_AGENT_MAX_STEPS`.

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_key(&self, key: &str) -> String {
        let suffix = key.to_uppercase().replace('.', "_");
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, suffix),
            None => suffix,
        }
    }
}

#[async_trait::async_trait]
impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        match std::env::var(self.env_key(key)) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        }
    }
}
