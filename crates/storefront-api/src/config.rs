//! Server configuration, read from the environment at startup.

use std::time::Duration;

use crate::error::AppError;

/// All tunables of the server, with defaults suitable for local runs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Partitions per event channel.
    pub partitions: usize,
    /// Undelivered events buffered per partition.
    pub channel_buffer: usize,
    /// Worker threads in the publish pool.
    pub publish_workers: usize,
    /// Pending jobs the publish pool queues before failing fast.
    pub publish_queue_depth: usize,
    /// Overall deadline for one aggregate read.
    pub read_timeout: Duration,
    /// Redeliveries before a failed event is dead-lettered.
    pub max_redeliveries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 7000,
            partitions: 2,
            channel_buffer: 64,
            publish_workers: 4,
            publish_queue_depth: 64,
            read_timeout: Duration::from_secs(2),
            max_redeliveries: 2,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| AppError::Config(format!("{name} must be valid: {e}"))),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parsed("PORT", defaults.port)?,
            partitions: env_parsed("CHANNEL_PARTITIONS", defaults.partitions)?,
            channel_buffer: env_parsed("CHANNEL_BUFFER", defaults.channel_buffer)?,
            publish_workers: env_parsed("PUBLISH_WORKERS", defaults.publish_workers)?,
            publish_queue_depth: env_parsed("PUBLISH_QUEUE_DEPTH", defaults.publish_queue_depth)?,
            read_timeout: Duration::from_millis(env_parsed(
                "READ_TIMEOUT_MS",
                u64::try_from(defaults.read_timeout.as_millis()).unwrap_or(2000),
            )?),
            max_redeliveries: env_parsed("MAX_REDELIVERIES", defaults.max_redeliveries)?,
        })
    }
}
