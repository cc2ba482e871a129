/// Configuration management for the Ripple client core
///
/// Loads configuration from environment variables.
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session settings
    pub session: SessionConfig,
    /// Simulated network latency
    pub latency: LatencyConfig,
    /// Search behavior
    pub search: SearchConfig,
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Id of the user the client is signed in as
    pub user_id: String,
}

/// Simulated network latency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Multiplier applied to every per-operation delay; 0 disables delays
    #[serde(default = "default_latency_scale")]
    pub scale: f64,
}

/// Search behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a pending query fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

// Default values
fn default_latency_scale() -> f64 {
    1.0
}

fn default_debounce_ms() -> u64 {
    300
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let session = SessionConfig {
            user_id: std::env::var("RIPPLE_SESSION_USER").unwrap_or_else(|_| "1".to_string()),
        };

        let latency = LatencyConfig {
            scale: std::env::var("RIPPLE_LATENCY_SCALE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_latency_scale),
        };
        anyhow::ensure!(
            latency.scale.is_finite() && latency.scale >= 0.0,
            "RIPPLE_LATENCY_SCALE must be a non-negative number"
        );

        let search = SearchConfig {
            debounce_ms: std::env::var("RIPPLE_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_debounce_ms),
        };

        Ok(Config {
            session,
            latency,
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch process-wide env vars.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("RIPPLE_SESSION_USER");
        std::env::remove_var("RIPPLE_LATENCY_SCALE");
        std::env::remove_var("RIPPLE_SEARCH_DEBOUNCE_MS");

        let config = Config::from_env().unwrap();

        assert_eq!(config.session.user_id, "1");
        assert_eq!(config.latency.scale, 1.0);
        assert_eq!(config.search.debounce_ms, 300);
    }

    #[test]
    fn test_rejects_negative_latency_scale() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("RIPPLE_LATENCY_SCALE", "-2");
        let err = Config::from_env();
        std::env::remove_var("RIPPLE_LATENCY_SCALE");
        assert!(err.is_err());
    }
}
