//! Call-center configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    DispatchError, FixedServiceTime, NameHashServiceTime, ServiceTimeProfile, UniformServiceTime,
};

/// Environment variable holding the number of agents.
pub const ENV_AGENT_CAPACITY: &str = "CALL_CENTER_AGENT_CAPACITY";
/// Environment variable holding the (minimum) service time in milliseconds.
pub const ENV_SERVICE_MS: &str = "CALL_CENTER_SERVICE_MS";
/// Environment variable holding the maximum service time in milliseconds.
/// When set together with [`ENV_SERVICE_MS`] the service time is uniform.
pub const ENV_SERVICE_MAX_MS: &str = "CALL_CENTER_SERVICE_MAX_MS";

/// How long each call takes to service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceTimeConfig {
    /// Every call takes `millis`.
    Fixed {
        /// Service time in milliseconds.
        millis: u64,
    },
    /// Uniformly random in `[min_millis, max_millis]`.
    Uniform {
        /// Lower bound in milliseconds.
        min_millis: u64,
        /// Upper bound in milliseconds.
        max_millis: u64,
    },
    /// `base_millis + 1000 * (hash(customer) % spread)`.
    NameHash {
        /// Base duration in milliseconds.
        base_millis: u64,
        /// Number of one-second buckets added on top of the base.
        spread: u32,
    },
}

impl Default for ServiceTimeConfig {
    fn default() -> Self {
        Self::NameHash {
            base_millis: 8_000,
            spread: 8,
        }
    }
}

impl ServiceTimeConfig {
    /// Validate bounds.
    ///
    /// # Errors
    ///
    /// Returns a message if a uniform range is inverted.
    pub fn validate(&self) -> Result<(), String> {
        if let Self::Uniform {
            min_millis,
            max_millis,
        } = self
        {
            if min_millis > max_millis {
                return Err("min_millis must not exceed max_millis".into());
            }
        }
        Ok(())
    }

    /// Build the runtime provider.
    #[must_use]
    pub fn profile(&self) -> ServiceTimeProfile {
        match *self {
            Self::Fixed { millis } => {
                ServiceTimeProfile::Fixed(FixedServiceTime(Duration::from_millis(millis)))
            }
            Self::Uniform {
                min_millis,
                max_millis,
            } => ServiceTimeProfile::Uniform(UniformServiceTime::new(
                Duration::from_millis(min_millis),
                Duration::from_millis(max_millis),
            )),
            Self::NameHash {
                base_millis,
                spread,
            } => ServiceTimeProfile::NameHash(NameHashServiceTime::new(
                Duration::from_millis(base_millis),
                Duration::from_secs(1),
                spread,
            )),
        }
    }
}

/// Root dispatcher configuration. Fixed for the lifetime of a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallCenterConfig {
    /// Number of agents that can handle calls concurrently.
    pub agent_capacity: u32,
    /// Service-time model.
    #[serde(default)]
    pub service_time: ServiceTimeConfig,
}

impl Default for CallCenterConfig {
    fn default() -> Self {
        Self {
            agent_capacity: 2,
            service_time: ServiceTimeConfig::default(),
        }
    }
}

impl CallCenterConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.agent_capacity == 0 {
            return Err("agent_capacity must be greater than 0".into());
        }
        self.service_time
            .validate()
            .map_err(|e| format!("service_time invalid: {e}"))
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// `DispatchError::Config` on malformed JSON, `DispatchError::Validation`
    /// on out-of-range values.
    pub fn from_json_str(input: &str) -> Result<Self, DispatchError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| DispatchError::Config(format!("parse error: {e}")))?;
        cfg.validate().map_err(DispatchError::Validation)?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// `DispatchError::Config` if a variable is not a number,
    /// `DispatchError::Validation` on out-of-range values.
    pub fn from_env() -> Result<Self, DispatchError> {
        // a missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`CallCenterConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DispatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(capacity) = parse_var::<u32>(&lookup, ENV_AGENT_CAPACITY)? {
            cfg.agent_capacity = capacity;
        }
        let min = parse_var::<u64>(&lookup, ENV_SERVICE_MS)?;
        let max = parse_var::<u64>(&lookup, ENV_SERVICE_MAX_MS)?;
        cfg.service_time = match (min, max) {
            (Some(min_millis), Some(max_millis)) => ServiceTimeConfig::Uniform {
                min_millis,
                max_millis,
            },
            (Some(millis), None) | (None, Some(millis)) => ServiceTimeConfig::Fixed { millis },
            (None, None) => cfg.service_time,
        };
        cfg.validate().map_err(DispatchError::Validation)?;
        Ok(cfg)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, DispatchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| DispatchError::Config(format!("{key}: {e}")))
        })
        .transpose()
}
