//! Service-time providers: how long an agent spends on a call.

use std::time::Duration;

use rand::Rng;

use crate::core::CallRecord;

/// Yields the simulated service duration for a call.
///
/// Any `Fn(&CallRecord) -> Duration` closure is a provider, so tests can
/// substitute deterministic durations.
pub trait ServiceTime: Send + Sync + 'static {
    /// Duration the handling unit spends on `call`.
    fn service_time(&self, call: &CallRecord) -> Duration;
}

impl<F> ServiceTime for F
where
    F: Fn(&CallRecord) -> Duration + Send + Sync + 'static,
{
    fn service_time(&self, call: &CallRecord) -> Duration {
        self(call)
    }
}

/// Same duration for every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedServiceTime(pub Duration);

impl ServiceTime for FixedServiceTime {
    fn service_time(&self, _call: &CallRecord) -> Duration {
        self.0
    }
}

/// Uniformly random duration in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformServiceTime {
    min: Duration,
    max: Duration,
}

impl UniformServiceTime {
    /// Create a provider; bounds are swapped if given in reverse.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl ServiceTime for UniformServiceTime {
    fn service_time(&self, _call: &CallRecord) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::rng().random_range(self.min..=self.max)
    }
}

/// `base + step * (hash(customer) % spread)`.
///
/// Deterministic per customer name. With `base = 8s`, `step = 1s` and
/// `spread = 8` every call lasts between 8 and 15 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameHashServiceTime {
    base: Duration,
    step: Duration,
    spread: u32,
}

impl NameHashServiceTime {
    /// Create a provider. A `spread` of 0 or 1 always yields `base`.
    #[must_use]
    pub const fn new(base: Duration, step: Duration, spread: u32) -> Self {
        Self { base, step, spread }
    }
}

impl Default for NameHashServiceTime {
    fn default() -> Self {
        Self::new(Duration::from_secs(8), Duration::from_secs(1), 8)
    }
}

impl ServiceTime for NameHashServiceTime {
    fn service_time(&self, call: &CallRecord) -> Duration {
        if self.spread <= 1 {
            return self.base;
        }
        let bucket = fnv1a(call.customer().as_bytes()) % u64::from(self.spread);
        // bucket < spread <= u32::MAX
        #[allow(clippy::cast_possible_truncation)]
        let bucket = bucket as u32;
        self.base + self.step * bucket
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Provider selected at runtime from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTimeProfile {
    /// See [`FixedServiceTime`].
    Fixed(FixedServiceTime),
    /// See [`UniformServiceTime`].
    Uniform(UniformServiceTime),
    /// See [`NameHashServiceTime`].
    NameHash(NameHashServiceTime),
}

impl ServiceTime for ServiceTimeProfile {
    fn service_time(&self, call: &CallRecord) -> Duration {
        match self {
            Self::Fixed(p) => p.service_time(call),
            Self::Uniform(p) => p.service_time(call),
            Self::NameHash(p) => p.service_time(call),
        }
    }
}
