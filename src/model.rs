mod account;
mod transaction;

use std::fmt::Display;

pub use account::Account;
use rust_decimal::{Decimal, RoundingStrategy};
pub use transaction::{Transaction, TransactionKind, TIMESTAMP_FORMAT};

/// Rounds `value` half-up to exactly `scale` fractional digits, padding with zeros when needed.
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// Currency rendering of an already rounded amount, e.g. `$1000.00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Money(Decimal);

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("${}", self.0))
    }
}
