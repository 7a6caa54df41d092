use hotcomments_config::{CrawlerConfig, MAX_DELAY_SECS};
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Convert configured seconds, clamping to `[0, MAX_DELAY_SECS]`. NaN maps to the limit.
fn bounded_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.min(MAX_DELAY_SECS)).unwrap_or(Duration::ZERO)
}

/// Randomized pause between page requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolitenessDelay {
    min: Duration,
    max: Duration,
}

impl PolitenessDelay {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            bounded_secs(config.delay_min_secs),
            bounded_secs(config.delay_max_secs),
        )
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw a duration uniformly from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let secs = rng.gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::try_from_secs_f64(secs).unwrap_or(self.max)
    }

    /// Sample the next pause from the thread-local RNG.
    pub fn next_delay(&self) -> Duration {
        let delay = self.sample(&mut rand::thread_rng());
        debug!(delay_secs = delay.as_secs_f64(), "Next politeness delay");
        delay
    }
}

impl Default for PolitenessDelay {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}
