//! Configuration provider trait

use std::fmt::Display;
use std::str::FromStr;

use super::{ConfigError, ConfigResult};

/// A read-only source of raw configuration strings keyed by dotted paths
/// such as `agent.max_steps`.
#[async_trait::async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    async fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;
}

/// Typed accessors layered over [`ConfigProvider::get_raw`]
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a value as a string, treating blank values as absent
    fn get_string(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ConfigResult<Option<String>>> + Send
    where
        Self: Sync,
    {
        async move {
            Ok(self
                .get_raw(key)
                .await?
                .filter(|value| !value.trim().is_empty()))
        }
    }

    /// Get a value parsed through [`FromStr`]
    fn get_parsed<T>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ConfigResult<Option<T>>> + Send
    where
        Self: Sync,
        T: FromStr + Send,
        T::Err: Display,
    {
        async move {
            match self.get_string(key).await? {
                Some(raw) => raw
                    .trim()
                    .parse::<T>()
                    .map(Some)
                    .map_err(|e| ConfigError::invalid(key, e.to_string())),
                None => Ok(None),
            }
        }
    }

    /// Like [`get_string`](Self::get_string) but fails when the key is absent
    fn require_string(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ConfigResult<String>> + Send
    where
        Self: Sync,
    {
        async move {
            self.get_string(key)
                .await?
                .ok_or_else(|| ConfigError::NotFound {
                    key: key.to_string(),
                })
        }
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}
