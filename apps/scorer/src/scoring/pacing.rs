//! Pacing of external calls against provider rate limits.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Hooks awaited around each query-engine call.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn before_call(&self) {}
    async fn after_call(&self) {}
}

/// Sleeps a fixed duration after every call, regardless of provider state.
#[derive(Debug, Clone)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn after_call(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Spaces call starts at least `interval` apart, waiting only for the remainder.
#[derive(Debug)]
pub struct MinInterval {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl MinInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RateLimiter for MinInterval {
    async fn before_call(&self) {
        let mut last_start = self.last_start.lock().await;
        if let Some(prev) = *last_start {
            tokio::time::sleep_until(prev + self.interval).await;
        }
        *last_start = Some(Instant::now());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {}

/// Pacing policy names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingMode {
    Fixed,
    Interval,
    None,
}

impl FromStr for PacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "interval" => Ok(Self::Interval),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown pacing mode '{other}' (expected fixed, interval or none)"
            )),
        }
    }
}

pub fn build_rate_limiter(mode: PacingMode, delay: Duration) -> Arc<dyn RateLimiter> {
    match mode {
        PacingMode::Fixed => Arc::new(FixedDelay(delay)),
        PacingMode::Interval => Arc::new(MinInterval::new(delay)),
        PacingMode::None => Arc::new(NoDelay),
    }
}
