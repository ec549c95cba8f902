use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SinkError, SubmissionSink};

/// Backend-agnostic sink configuration.
///
/// `backend` must match the [`SinkFactory::backend_name`] of a registered
/// factory. `target` is passed through to that factory unchanged; its
/// meaning is entirely backend-specific.
///
/// | backend | target examples            |
/// |---------|----------------------------|
/// | `log`   | ignored                    |
/// | `csv`   | `submissions.csv`          |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"log"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub target: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            backend: "log".to_string(),
            target: String::new(),
        }
    }
}

/// One implementation per sink backend, registered with a [`SinkRegistry`]
/// at startup.
#[async_trait]
pub trait SinkFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open the destination described by `config` and return a ready sink.
    async fn create(
        &self,
        config: &SinkConfig,
    ) -> Result<Box<dyn SubmissionSink>, SinkError>;
}

/// Registry of [`SinkFactory`] instances, keyed by backend name.
pub struct SinkRegistry {
    factories: HashMap<&'static str, Box<dyn SinkFactory>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// A factory with the same [`SinkFactory::backend_name`] is replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn SinkFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`SinkError::Configuration`] when no factory is registered for the
    ///   requested backend.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &SinkConfig,
    ) -> Result<Box<dyn SubmissionSink>, SinkError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SinkError::Configuration(format!(
                    "unknown sink '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}
