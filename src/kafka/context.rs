//! Shared context for a fetch session
//!
//! Every message set decoded in a session reads configuration and notifies
//! observers through one `FetchContext`, created at startup and passed by
//! reference instead of living in global state.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::Config;

use super::error::Result;
use super::observers::ObserverRegistry;

/// Configuration and observers shared by all decoders of a fetch session
///
/// # Thread Safety
///
/// Multiple threads can read config concurrently. Reload operations acquire
/// a write lock briefly to swap the Arc pointer.
///
/// # Usage
///
/// ```rust,ignore
/// let ctx = FetchContext::new(Config::load()?);
/// ctx.observers().register("offsets", Some(tracker))?;
///
/// let mut set = MessageSet::new(&mut partition, &ctx)?;
/// ```
#[derive(Debug)]
pub struct FetchContext {
    config: RwLock<Arc<Config>>,
    observers: ObserverRegistry,
}

impl FetchContext {
    pub fn new(config: Config) -> Self {
        Self::with_observers(config, ObserverRegistry::new())
    }

    pub fn with_observers(config: Config, observers: ObserverRegistry) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            observers,
        }
    }

    /// Get current config (cheap Arc clone - single pointer copy)
    pub fn config(&self) -> Arc<Config> {
        self.config.read().clone()
    }

    /// Reload config from the environment
    ///
    /// Decoders already holding the previous config keep using it until
    /// they are dropped. On error the current config is left untouched.
    pub fn reload(&self) -> Result<()> {
        let new_config = Config::load()?;
        self.replace_config(new_config);
        Ok(())
    }

    pub fn replace_config(&self, config: Config) {
        *self.config.write() = Arc::new(config);
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
