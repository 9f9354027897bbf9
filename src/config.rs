use rust_decimal::Decimal;
use thiserror::Error;

use crate::auth::is_valid_pin_format;
use crate::model::round_half_up;

/// Largest number of fractional digits a `Decimal` can carry.
pub const MAX_SCALE: u32 = 28;

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ConfigError {
    #[error("Reference PIN must be exactly 4 digits")]
    InvalidPin,
    #[error("At least one PIN attempt must be allowed")]
    NoPinAttempts,
    #[error("Minimum transaction amount must be positive")]
    NonPositiveMinimum,
    #[error("Minimum transaction amount {min} exceeds maximum {max}")]
    InvertedLimits { min: Decimal, max: Decimal },
    #[error("Initial balance cannot be negative")]
    NegativeInitialBalance,
    #[error("Scale {scale} exceeds the maximum of {} fractional digits", MAX_SCALE)]
    ScaleTooLarge { scale: u32 },
    #[error("{field} {value} cannot be represented with {scale} fractional digits")]
    Unrepresentable {
        field: &'static str,
        value: Decimal,
        scale: u32,
    },
}

/// Everything that shapes a run. Passed to the authenticator and session at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub pin: String,
    pub max_pin_attempts: u32,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub initial_balance: Decimal,
    /// Fractional digits kept on every amount and balance.
    pub scale: u32,
    /// Whether the session log opens with an `INITIAL` record.
    pub record_opening_balance: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pin: "1234".to_string(),
            max_pin_attempts: 3,
            min_amount: Decimal::new(100, 2),
            max_amount: Decimal::new(1_000_000, 2),
            initial_balance: Decimal::new(100_000, 2),
            scale: 2,
            record_opening_balance: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_pin_format(&self.pin) {
            return Err(ConfigError::InvalidPin);
        }

        if self.max_pin_attempts == 0 {
            return Err(ConfigError::NoPinAttempts);
        }

        if self.scale > MAX_SCALE {
            return Err(ConfigError::ScaleTooLarge { scale: self.scale });
        }

        for (field, value) in [
            ("Minimum transaction amount", self.min_amount),
            ("Maximum transaction amount", self.max_amount),
            ("Initial balance", self.initial_balance),
        ] {
            if round_half_up(value, self.scale).scale() != self.scale {
                return Err(ConfigError::Unrepresentable {
                    field,
                    value,
                    scale: self.scale,
                });
            }
        }

        if self.min_amount <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveMinimum);
        }

        if self.min_amount > self.max_amount {
            return Err(ConfigError::InvertedLimits {
                min: self.min_amount,
                max: self.max_amount,
            });
        }

        if self.initial_balance < Decimal::ZERO {
            return Err(ConfigError::NegativeInitialBalance);
        }

        Ok(())
    }
}
