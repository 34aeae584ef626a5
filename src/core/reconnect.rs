//! Reconnect scheduling shared by the browser and native transports

use std::time::Duration;

/// Delay between reconnect attempts when nothing else is configured
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(5000);

/// When and how often a dropped connection is re-established
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// Stay closed after the first disconnect
    Never,
    /// Constant delay; `max_attempts: None` retries forever
    Fixed {
        interval: Duration,
        max_attempts: Option<u32>,
    },
    /// Delay doubles from `base` up to `cap`
    Exponential {
        base: Duration,
        cap: Duration,
        max_attempts: Option<u32>,
    },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy::Fixed {
            interval: DEFAULT_RECONNECT_INTERVAL,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (1-based), or `None` to give up.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        match *self {
            ReconnectPolicy::Never => None,
            ReconnectPolicy::Fixed {
                interval,
                max_attempts,
            } => within(attempt, max_attempts).then_some(interval),
            ReconnectPolicy::Exponential {
                base,
                cap,
                max_attempts,
            } => {
                if !within(attempt, max_attempts) {
                    return None;
                }
                let shift = attempt.saturating_sub(1).min(16);
                let delay = base.saturating_mul(1u32 << shift);
                Some(delay.min(cap))
            }
        }
    }
}

fn within(attempt: u32, max_attempts: Option<u32>) -> bool {
    max_attempts.map_or(true, |max| attempt <= max)
}
