use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{round_half_up, Money};

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum AmountError {
    #[error("Amount cannot be empty.")]
    Empty,
    #[error("Invalid amount format. Use numbers like 50.00.")]
    InvalidFormat,
    #[error("Invalid amount. Must be between {min} and {max}.")]
    OutOfRange { min: Money, max: Money },
}

/// Inclusive bounds and rounding applied to every entered amount.
#[derive(Debug, Clone, Copy)]
pub struct AmountLimits {
    pub min: Decimal,
    pub max: Decimal,
    pub scale: u32,
}

impl AmountLimits {
    /// Parses `input`, rounds it half-up to the configured scale and checks the rounded value
    /// against the bounds.
    pub fn parse(&self, input: &str) -> Result<Decimal, AmountError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(AmountError::Empty);
        }

        if !is_plain_decimal(input) {
            return Err(AmountError::InvalidFormat);
        }

        let value = Decimal::from_str(input).map_err(|_| AmountError::InvalidFormat)?;
        let amount = round_half_up(value, self.scale);

        if amount < self.min || amount > self.max {
            return Err(AmountError::OutOfRange {
                min: round_half_up(self.min, self.scale).into(),
                max: round_half_up(self.max, self.scale).into(),
            });
        }

        Ok(amount)
    }
}

// optional sign, digits, at most one decimal point, at least one digit
fn is_plain_decimal(input: &str) -> bool {
    let unsigned = input.strip_prefix(['+', '-']).unwrap_or(input);
    let mut digits = 0;
    let mut points = 0;

    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    digits > 0 && points <= 1
}
