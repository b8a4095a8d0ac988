use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::{Set, SetStatus};

/// Rest interval anchored to the wall clock.
///
/// All values are derived from the start time and the duration, so a timer survives any period in
/// which nobody looked at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl RestTimer {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, duration: u32) -> Self {
        Self {
            started_at,
            duration: Duration::seconds(i64::from(duration)),
        }
    }

    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).max(Duration::zero())
    }

    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.duration - self.elapsed(now)).max(Duration::zero())
    }

    #[must_use]
    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).is_zero()
    }

    #[must_use]
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.started_at
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl Set {
    #[must_use]
    pub fn rest_timer(&self) -> Option<RestTimer> {
        if self.status != SetStatus::Resting {
            return None;
        }
        self.rest_started_at
            .map(|started_at| RestTimer::new(started_at, self.rest_duration))
    }

    #[must_use]
    pub fn remaining_rest(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.rest_timer().map(|timer| timer.remaining(now))
    }
}

/// Rest duration after applying a relative change, never below zero.
#[must_use]
pub fn adjust_rest_duration(current: u32, delta: i64) -> u32 {
    clamp_rest_duration(i64::from(current).saturating_add(delta))
}

#[must_use]
pub fn clamp_rest_duration(seconds: i64) -> u32 {
    if seconds < 0 {
        warn!("clamped negative rest duration {seconds} s to 0 s");
    }
    u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
}
