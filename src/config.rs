// Application configuration
// Every section has a default so an empty JSON object is a valid config

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::session::Role;

pub const CONFIG_ENV_VAR: &str = "BOOKMYHOTEL_CONFIG";

// Hard limits of the guest selector; configured bounds must sit inside them
pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid guest bounds: min {min} > max {max}")]
    GuestBounds { min: u8, max: u8 },

    #[error("Guest bound {value} is outside 1..=6")]
    GuestLimit { value: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub booking: BookingConfig,
    pub latency: LatencyConfig,
    pub currency: String,
    pub accounts: Vec<DemoAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            booking: BookingConfig::default(),
            latency: LatencyConfig::default(),
            currency: "USD".to_string(),
            accounts: vec![
                DemoAccount {
                    email: "user@bookmyhotel.com".to_string(),
                    password: "password".to_string(),
                    role: Role::User,
                },
                DemoAccount {
                    email: "admin@bookmyhotel.com".to_string(),
                    password: "admin123".to_string(),
                    role: Role::Admin,
                },
            ],
        }
    }
}

// Guest bounds for the booking form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub min_guests: u8,
    pub max_guests: u8,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            min_guests: MIN_GUESTS,
            max_guests: MAX_GUESTS,
        }
    }
}

impl BookingConfig {
    // Effective bounds, never wider than the selector's hard limits
    pub fn guest_range(&self) -> (u8, u8) {
        let min = self.min_guests.clamp(MIN_GUESTS, MAX_GUESTS);
        let max = self.max_guests.clamp(min, MAX_GUESTS);
        (min, max)
    }
}

// Artificial delays standing in for a backend round trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub sign_in_ms: u64,
    pub register_ms: u64,
    pub reservation_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            sign_in_ms: 1000,
            register_ms: 1200,
            reservation_ms: 0,
        }
    }
}

impl LatencyConfig {
    /// No artificial delay anywhere. Handy for tests.
    pub fn none() -> Self {
        Self {
            sign_in_ms: 0,
            register_ms: 0,
            reservation_ms: 0,
        }
    }

    pub fn sign_in(&self) -> Duration {
        Duration::from_millis(self.sign_in_ms)
    }

    pub fn register(&self) -> Duration {
        Duration::from_millis(self.register_ms)
    }

    pub fn reservation(&self) -> Duration {
        Duration::from_millis(self.reservation_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    // Falls back to defaults when the variable is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                tracing::info!("Loading config from {}", path);
                Self::from_file(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let BookingConfig {
            min_guests,
            max_guests,
        } = self.booking;
        if let Some(value) = [min_guests, max_guests]
            .into_iter()
            .find(|v| !(MIN_GUESTS..=MAX_GUESTS).contains(v))
        {
            return Err(ConfigError::GuestLimit { value });
        }
        if min_guests > max_guests {
            return Err(ConfigError::GuestBounds {
                min: min_guests,
                max: max_guests,
            });
        }
        Ok(())
    }
}
