use std::fmt::Display;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::Money;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Initial,
    Deposit,
    Withdrawal,
    BalanceInquiry,
    WithdrawalFailed,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Initial => "INITIAL",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
            TransactionKind::BalanceInquiry => "BALANCE_INQUIRY",
            TransactionKind::WithdrawalFailed => "WITHDRAWAL_FAILED",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Immutable audit record of one session action.
#[derive(Debug, Clone)]
pub struct Transaction {
    timestamp: NaiveDateTime,
    kind: TransactionKind,
    amount: Option<Decimal>,
    description: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Option<Decimal>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            kind,
            amount,
            description: description.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let amount = match self.amount {
            Some(amount) => Money::from(amount).to_string(),
            None => "N/A".to_string(),
        };

        write!(
            f,
            "[{}] {:<18} {:<10} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            amount,
            self.description
        )
    }
}

#[cfg(test)]
mod test {
    use assert2::check;

    use super::*;

    #[test]
    fn test_transaction_display_pads_columns() {
        let tx = Transaction::new(
            TransactionKind::Deposit,
            Some(Decimal::new(5000, 2)),
            "Deposit",
        );
        let rendered = tx.to_string();
        let prefix = format!("[{}] ", tx.timestamp().format(TIMESTAMP_FORMAT));

        check!(rendered == format!("{prefix}DEPOSIT            $50.00     Deposit"));
    }

    #[test]
    fn test_transaction_display_without_amount() {
        let tx = Transaction::new(TransactionKind::BalanceInquiry, None, "Checked balance");

        check!(tx.to_string().ends_with("BALANCE_INQUIRY    N/A        Checked balance"));
    }
}
