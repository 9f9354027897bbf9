use rust_decimal::Decimal;

use crate::session::SessionError;

use super::round_half_up;

/// The single in-memory account of a session. The balance never goes negative.
#[derive(Debug)]
pub struct Account {
    balance: Decimal,
    scale: u32,
}

impl Account {
    pub fn new(initial_balance: Decimal, scale: u32) -> Self {
        Self {
            balance: round_half_up(initial_balance.max(Decimal::ZERO), scale),
            scale,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn can_cover(&self, amount: Decimal) -> bool {
        amount <= self.balance
    }

    /// Refuses a credit whose result no longer fits at the account's scale.
    pub(crate) fn credit(&mut self, amount: Decimal) -> Result<(), SessionError> {
        let balance = self
            .balance
            .checked_add(amount)
            .map(|sum| round_half_up(sum, self.scale))
            .filter(|sum| sum.scale() == self.scale)
            .ok_or(SessionError::BalanceLimit)?;

        self.balance = balance;

        Ok(())
    }

    /// Callers check [`Account::can_cover`] first.
    pub(crate) fn debit(&mut self, amount: Decimal) {
        debug_assert!(self.can_cover(amount));
        self.balance = round_half_up(self.balance - amount, self.scale);
    }
}

#[cfg(test)]
mod test {
    use assert2::check;

    use super::*;

    #[test]
    fn test_new_account_is_rounded_to_scale() {
        let account = Account::new(Decimal::new(1000, 0), 2);

        check!(account.balance().to_string() == "1000.00");
    }

    #[test]
    fn test_credit_and_debit() {
        let mut account = Account::new(Decimal::new(100000, 2), 2);

        account.credit(Decimal::new(5000, 2)).unwrap();
        account.debit(Decimal::new(3000, 2));

        check!(account.balance() == Decimal::new(102000, 2));
        check!(account.can_cover(Decimal::new(102000, 2)));
        check!(!account.can_cover(Decimal::new(102001, 2)));
    }

    #[test]
    fn test_credit_beyond_capacity_is_refused() {
        let mut account = Account::new(Decimal::MAX - Decimal::ONE, 0);

        check!(account.credit(Decimal::new(5, 0)) == Err(SessionError::BalanceLimit));
        check!(account.balance() == Decimal::MAX - Decimal::ONE);

        check!(account.credit(Decimal::ONE) == Ok(()));
        check!(account.balance() == Decimal::MAX);
    }
}
