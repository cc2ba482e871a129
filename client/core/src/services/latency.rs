use std::time::Duration;

use crate::config::LatencyConfig;

/// Simulated network latency. Every service call awaits one of these
/// before touching the store; nothing resolves instantaneously.
#[derive(Debug, Clone)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    pub fn from_config(config: &LatencyConfig) -> Self {
        Self::new(config.scale)
    }

    /// No delays at all. Intended for tests.
    pub fn off() -> Self {
        Self::new(0.0)
    }

    pub(crate) async fn simulate(&self, base_ms: u64) {
        if self.scale <= 0.0 {
            return;
        }
        let ms = (base_ms as f64 * self.scale).round() as u64;
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(1.0)
    }
}
