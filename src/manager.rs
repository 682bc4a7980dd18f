use crate::{
    config::AccessConfig,
    store::{RegisterError, TokenStore},
    sweeper::Sweeper,
};
use slog_scope::info;
use std::path::PathBuf;

/// Process-wide façade over the token store and its sweeper.
///
/// Construct exactly one per process with [`AccessManager::start`] and hand
/// clones to whatever serves requests. The sweeper task it spawns is
/// detached: it outlives any individual request and is simply abandoned
/// when the process exits.
#[derive(Clone, Debug)]
pub struct AccessManager {
    store: TokenStore,
}

impl AccessManager {
    /// Builds the store and launches the single background sweeper task.
    /// Must be called from within a tokio runtime.
    pub fn start(config: &AccessConfig) -> AccessManager {
        let store = TokenStore::new(config.token_length, config.ttl());
        let sweeper = Sweeper::new(store.clone(), config.sweep_interval());
        tokio::spawn(sweeper.run());
        info!(
            "access manager started (ttl {}s, sweep every {}s)",
            config.ttl_secs, config.sweep_interval_secs
        );
        AccessManager { store }
    }

    /// Registers a produced artifact and returns its download token.
    pub fn register(&self, filename: impl Into<PathBuf>) -> Result<String, RegisterError> {
        self.store.register(filename)
    }

    /// Redeems a token for the artifact path, or `None` if the token is
    /// invalid or expired.
    pub fn redeem(&self, token: &str) -> Option<PathBuf> {
        self.store.redeem(token)
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }
}
