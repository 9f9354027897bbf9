use rust_decimal::Decimal;
use thiserror::Error;

use crate::amount::{AmountError, AmountLimits};
use crate::config::Config;
use crate::model::{Account, Money, Transaction, TransactionKind};

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum SessionError {
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("Insufficient funds to withdraw {requested}. Available: {available}")]
    InsufficientFunds { requested: Money, available: Money },
    #[error("Deposit refused. The balance cannot hold that amount.")]
    BalanceLimit,
    #[error("Session has ended")]
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// Transaction engine of one authenticated run. Owns the account and its audit log.
pub struct Session {
    limits: AmountLimits,
    account: Account,
    history: Vec<Transaction>,
    state: SessionState,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let account = Account::new(config.initial_balance, config.scale);
        let mut history = Vec::new();

        if config.record_opening_balance {
            history.push(Transaction::new(
                TransactionKind::Initial,
                Some(account.balance()),
                "Initial balance setup",
            ));
        }

        Self {
            limits: AmountLimits {
                min: config.min_amount,
                max: config.max_amount,
                scale: config.scale,
            },
            account,
            history,
            state: SessionState::Active,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Audit log in insertion order. Reading it is never itself recorded.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn check_balance(&mut self) -> Result<Decimal, SessionError> {
        self.ensure_active()?;

        let balance = self.account.balance();
        self.record(TransactionKind::BalanceInquiry, None, "Checked balance");

        Ok(balance)
    }

    /// Returns the amount credited after rounding.
    pub fn deposit(&mut self, input: &str) -> Result<Decimal, SessionError> {
        self.ensure_active()?;

        let amount = self.limits.parse(input)?;

        if let Err(err) = self.account.credit(amount) {
            tracing::warn!(%amount, balance = %self.account.balance(), "deposit exceeds balance capacity");
            return Err(err);
        }

        self.record(TransactionKind::Deposit, Some(amount), "Deposit");

        tracing::info!(%amount, balance = %self.account.balance(), "deposit accepted");

        Ok(amount)
    }

    /// Returns the amount debited after rounding. A shortfall is recorded before it is returned.
    pub fn withdraw(&mut self, input: &str) -> Result<Decimal, SessionError> {
        self.ensure_active()?;

        let amount = self.limits.parse(input)?;

        if !self.account.can_cover(amount) {
            self.record(
                TransactionKind::WithdrawalFailed,
                Some(amount),
                "Attempted withdrawal with insufficient funds",
            );

            tracing::warn!(%amount, balance = %self.account.balance(), "withdrawal exceeds balance");

            return Err(SessionError::InsufficientFunds {
                requested: amount.into(),
                available: self.account.balance().into(),
            });
        }

        self.account.debit(amount);
        self.record(TransactionKind::Withdrawal, Some(amount), "Withdrawal");

        tracing::info!(%amount, balance = %self.account.balance(), "withdrawal accepted");

        Ok(amount)
    }

    pub fn exit(&mut self) {
        tracing::info!(balance = %self.account.balance(), "session terminated");
        self.state = SessionState::Terminated;
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Terminated => Err(SessionError::Terminated),
        }
    }

    fn record(&mut self, kind: TransactionKind, amount: Option<Decimal>, description: &str) {
        self.history.push(Transaction::new(kind, amount, description));
    }
}
