//! Scheduler configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::core::SchedulerError;

/// Environment variable holding the concurrency limit.
pub const ENV_MAX_CONCURRENCY: &str = "SCHEDULER_MAX_CONCURRENCY";
/// Environment variable holding the per-task timeout in milliseconds.
pub const ENV_PER_TASK_TIMEOUT_MS: &str = "SCHEDULER_PER_TASK_TIMEOUT_MS";
/// Environment variable holding the overall timeout in milliseconds.
pub const ENV_OVERALL_TIMEOUT_MS: &str = "SCHEDULER_OVERALL_TIMEOUT_MS";

const DEFAULT_MAX_CONCURRENCY: usize = 3;
const DEFAULT_PER_TASK_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(2);

/// Limits for one scheduler run.
///
/// Serialized through [`SchedulerSettings`], so JSON uses millisecond fields
/// and rejects negative values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchedulerSettings", into = "SchedulerSettings")]
pub struct SchedulerConfig {
    /// Maximum number of tasks executing at once.
    pub max_concurrency: usize,
    /// Budget of a single task, further bounded by the overall budget.
    pub per_task_timeout: Duration,
    /// Budget of the whole run, shared by every task.
    pub overall_timeout: Duration,
}

/// Raw, signed form of [`SchedulerConfig`] as found in JSON or the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Maximum concurrent tasks.
    pub max_concurrency: i64,
    /// Per-task timeout in milliseconds.
    pub per_task_timeout_ms: i64,
    /// Overall timeout in milliseconds.
    pub overall_timeout_ms: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            per_task_timeout: DEFAULT_PER_TASK_TIMEOUT,
            overall_timeout: DEFAULT_OVERALL_TIMEOUT,
        }
    }
}

impl SchedulerConfig {
    /// Default configuration: 3 concurrent tasks, 2 s per task, 2 s overall.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Set the per-task budget.
    #[must_use]
    pub const fn with_per_task_timeout(mut self, timeout: Duration) -> Self {
        self.per_task_timeout = timeout;
        self
    }

    /// Set the overall budget.
    #[must_use]
    pub const fn with_overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if `max_concurrency` is zero or
    /// larger than the gate can represent.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.max_concurrency == 0 {
            return Err(SchedulerError::InvalidConfig(
                "max_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_concurrency > Semaphore::MAX_PERMITS {
            return Err(SchedulerError::InvalidConfig(format!(
                "max_concurrency must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Parse` for malformed JSON or out-of-range
    /// values.
    pub fn from_json_str(input: &str) -> Result<Self, SchedulerError> {
        let cfg: Self = serde_json::from_str(input)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for a `.env` file that exists
    /// but cannot be loaded, and for unparsable or out-of-range values.
    pub fn from_env() -> Result<Self, SchedulerError> {
        load_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for unparsable or out-of-range
    /// values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SchedulerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SchedulerSettings::from(Self::default());
        let read = |key: &str, default: i64| -> Result<i64, SchedulerError> {
            lookup(key).map_or(Ok(default), |raw| {
                raw.trim().parse::<i64>().map_err(|e| {
                    SchedulerError::InvalidConfig(format!("{key}={raw:?} is not an integer: {e}"))
                })
            })
        };
        let settings = SchedulerSettings {
            max_concurrency: read(ENV_MAX_CONCURRENCY, defaults.max_concurrency)?,
            per_task_timeout_ms: read(ENV_PER_TASK_TIMEOUT_MS, defaults.per_task_timeout_ms)?,
            overall_timeout_ms: read(ENV_OVERALL_TIMEOUT_MS, defaults.overall_timeout_ms)?,
        };
        let cfg = Self::try_from(settings)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

impl TryFrom<SchedulerSettings> for SchedulerConfig {
    type Error = SchedulerError;

    fn try_from(raw: SchedulerSettings) -> Result<Self, Self::Error> {
        let max_concurrency = usize::try_from(raw.max_concurrency)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                SchedulerError::InvalidConfig(format!(
                    "max_concurrency must be greater than 0, got {}",
                    raw.max_concurrency
                ))
            })?;
        Ok(Self {
            max_concurrency,
            per_task_timeout: millis("per_task_timeout_ms", raw.per_task_timeout_ms)?,
            overall_timeout: millis("overall_timeout_ms", raw.overall_timeout_ms)?,
        })
    }
}

impl From<SchedulerConfig> for SchedulerSettings {
    fn from(cfg: SchedulerConfig) -> Self {
        Self {
            max_concurrency: i64::try_from(cfg.max_concurrency).unwrap_or(i64::MAX),
            per_task_timeout_ms: i64::try_from(cfg.per_task_timeout.as_millis()).unwrap_or(i64::MAX),
            overall_timeout_ms: i64::try_from(cfg.overall_timeout.as_millis()).unwrap_or(i64::MAX),
        }
    }
}

// A missing `.env` is fine; a broken one is not.
fn load_dotenv(loaded: Result<PathBuf, dotenvy::Error>) -> Result<(), SchedulerError> {
    match loaded {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(SchedulerError::InvalidConfig(format!(
            ".env could not be loaded: {err}"
        ))),
    }
}

fn millis(field: &str, value: i64) -> Result<Duration, SchedulerError> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| SchedulerError::InvalidConfig(format!("{field} must not be negative, got {value}")))
}
