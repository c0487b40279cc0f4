use crate::model::{Amount, DEFAULT_ALLOWANCE};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const DEFAULT_READY_DELAY_SECS: u64 = 30;
pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Runtime settings. `Default` is what tests use; binaries read the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanteenConfig {
    /// Allowance for accounts with no stored allowance.
    pub default_allowance: Amount,
    /// Seconds between paying and the order-ready notification.
    pub ready_delay_secs: u64,
    /// Where records are kept. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub channel_buffer: usize,
    /// Delete the user's stored record on logout.
    pub purge_on_logout: bool,
}

impl Default for CanteenConfig {
    fn default() -> Self {
        Self {
            default_allowance: DEFAULT_ALLOWANCE,
            ready_delay_secs: DEFAULT_READY_DELAY_SECS,
            data_dir: None,
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            purge_on_logout: false,
        }
    }
}

impl CanteenConfig {
    /// Reads `CANTEEN_*` variables, falling back to defaults for anything unset or invalid.
    pub fn from_env() -> Self {
        Self::load_with(|key| env::var(key).ok())
    }

    fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_allowance: try_load(
                &lookup,
                "CANTEEN_DEFAULT_ALLOWANCE",
                defaults.default_allowance,
            ),
            ready_delay_secs: try_load(
                &lookup,
                "CANTEEN_READY_DELAY_SECS",
                defaults.ready_delay_secs,
            ),
            data_dir: lookup("CANTEEN_DATA_DIR").map(PathBuf::from),
            channel_buffer: try_load(&lookup, "CANTEEN_CHANNEL_BUFFER", defaults.channel_buffer)
                .max(1),
            purge_on_logout: try_load(
                &lookup,
                "CANTEEN_PURGE_ON_LOGOUT",
                defaults.purge_on_logout,
            ),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> CanteenConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CanteenConfig::load_with(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_use_defaults() {
        assert_eq!(load(&[]), CanteenConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = load(&[
            ("CANTEEN_DEFAULT_ALLOWANCE", "4000"),
            ("CANTEEN_READY_DELAY_SECS", " 5 "),
            ("CANTEEN_DATA_DIR", "/var/lib/canteen"),
            ("CANTEEN_PURGE_ON_LOGOUT", "true"),
        ]);
        assert_eq!(config.default_allowance, 4000);
        assert_eq!(config.ready_delay_secs, 5);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/canteen")));
        assert!(config.purge_on_logout);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = load(&[
            ("CANTEEN_DEFAULT_ALLOWANCE", "-200"),
            ("CANTEEN_CHANNEL_BUFFER", "0"),
        ]);
        assert_eq!(config.default_allowance, DEFAULT_ALLOWANCE);
        assert_eq!(config.channel_buffer, 1);
    }
}
