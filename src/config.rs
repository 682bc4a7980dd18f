use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "kebab-case")]
pub struct AccessConfig {
    /// Random bytes per download token
    #[serde(default = "AccessConfig::default_token_length")]
    pub token_length: usize,
    /// How long a token stays redeemable, in seconds
    #[serde(default = "AccessConfig::default_ttl")]
    pub ttl_secs: u64,
    /// Pause between sweeper passes, in seconds
    #[serde(default = "AccessConfig::default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl AccessConfig {
    fn default_token_length() -> usize {
        32
    }

    fn default_ttl() -> u64 {
        600
    }

    fn default_sweep_interval() -> u64 {
        60
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Reads overrides from `ACCESS_TOKEN_LENGTH`, `ACCESS_TTL_SECS` and
    /// `ACCESS_SWEEP_INTERVAL_SECS`; unset variables keep the defaults.
    pub fn from_env() -> anyhow::Result<AccessConfig> {
        let mut config = AccessConfig::default();
        if let Some(val) = env_u64("ACCESS_TOKEN_LENGTH")? {
            config.token_length = val as usize;
        }
        if let Some(val) = env_u64("ACCESS_TTL_SECS")? {
            config.ttl_secs = val;
        }
        if let Some(val) = env_u64("ACCESS_SWEEP_INTERVAL_SECS")? {
            config.sweep_interval_secs = val;
        }
        Ok(config)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        AccessConfig {
            token_length: Self::default_token_length(),
            ttl_secs: Self::default_ttl(),
            sweep_interval_secs: Self::default_sweep_interval(),
        }
    }
}

fn env_u64(name: &str) -> anyhow::Result<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => {
            let val = raw
                .parse()
                .with_context(|| format!("{} is not a number: {:?}", name, raw))?;
            Ok(Some(val))
        }
        Err(_) => Ok(None),
    }
}
