use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;

use crate::{KennelConfig, KennelService, KennelServiceRegistry};

struct KennelAppInner<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    registry: RwLock<KennelServiceRegistry<R, P>>,
    config: RwLock<KennelConfig>,
}

/// KennelApp is the central application container.
///
/// Framework-agnostic. Holds the service registry and the config store.
/// Clones share the same state.
pub struct KennelApp<R, P = ()>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    inner: Arc<KennelAppInner<R, P>>,
}

impl<R, P> Default for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> Clone for KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> KennelApp<R, P>
where
    R: Send + 'static,
    P: Send + Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(KennelAppInner {
                registry: RwLock::new(KennelServiceRegistry::new()),
                config: RwLock::new(KennelConfig::new()),
            }),
        }
    }

    pub fn register_service<S>(&self, name: S, service: Arc<dyn KennelService<R, P>>)
    where
        S: Into<String>,
    {
        self.inner.registry.write().register(name, service);
    }

    pub fn service(&self, name: &str) -> Result<Arc<dyn KennelService<R, P>>> {
        self.inner
            .registry
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("KennelService not found: {name}"))
    }

    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.config.write().set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.config.read().get(key).map(|v| v.to_string())
    }

    /// Fold `PREFIX__SECTION__KEY` style variables into the config.
    pub fn load_env<I, K, V>(&self, prefix: &str, vars: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.inner.config.write().apply_prefixed(prefix, vars)
    }

    pub fn config_snapshot(&self) -> crate::KennelConfigSnapshot {
        self.inner.config.read().snapshot()
    }
}
