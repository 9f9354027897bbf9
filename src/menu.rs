use std::io;
use std::str::FromStr;

use thiserror::Error;

use crate::console::Console;
use crate::model::Money;
use crate::session::{Session, SessionError};

pub const CANCEL_TOKEN: &str = "cancel";

const MENU: &str = "
--- ATM MENU ---
1. Check Balance
2. Deposit Money
3. Withdraw Money
4. View Transaction History
5. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CheckBalance,
    Deposit,
    Withdraw,
    ViewHistory,
    Exit,
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ChoiceError {
    #[error("Input cannot be empty. Please enter a number.")]
    Empty,
    #[error("Invalid input. Enter a numeric value (e.g., 1, 2, 3).")]
    NotANumber,
    #[error("Invalid choice. Please enter a number between 1 and 5.")]
    OutOfRange,
}

impl FromStr for MenuChoice {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ChoiceError::Empty);
        }

        match s.parse::<i64>().map_err(|_| ChoiceError::NotANumber)? {
            1 => Ok(MenuChoice::CheckBalance),
            2 => Ok(MenuChoice::Deposit),
            3 => Ok(MenuChoice::Withdraw),
            4 => Ok(MenuChoice::ViewHistory),
            5 => Ok(MenuChoice::Exit),
            _ => Err(ChoiceError::OutOfRange),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmountOperation {
    Deposit,
    Withdraw,
}

/// Drives `session` from menu choices read off `console` until it terminates.
/// End of input is treated as an exit.
pub fn run<C: Console>(session: &mut Session, console: &mut C) -> io::Result<()> {
    loop {
        console.write_line(MENU)?;

        let Some(choice) = read_choice(console)? else {
            tracing::info!("input closed at menu");
            return exit(session, console);
        };

        match choice {
            MenuChoice::CheckBalance => show_balance(session, console)?,
            MenuChoice::Deposit => enter_amount(session, console, AmountOperation::Deposit)?,
            MenuChoice::Withdraw => enter_amount(session, console, AmountOperation::Withdraw)?,
            MenuChoice::ViewHistory => show_history(session, console)?,
            MenuChoice::Exit => return exit(session, console),
        }
    }
}

fn read_choice<C: Console>(console: &mut C) -> io::Result<Option<MenuChoice>> {
    loop {
        let Some(line) = console.prompt("Enter your choice: ")? else {
            return Ok(None);
        };

        match line.parse::<MenuChoice>() {
            Ok(choice) => return Ok(Some(choice)),
            Err(err) => {
                tracing::debug!(input = %line, %err, "invalid menu choice");
                console.write_line(&err.to_string())?;
            }
        }
    }
}

fn show_balance<C: Console>(session: &mut Session, console: &mut C) -> io::Result<()> {
    match session.check_balance() {
        Ok(balance) => console.write_line(&format!("Current balance: {}", Money::from(balance))),
        Err(err) => console.write_line(&err.to_string()),
    }
}

fn enter_amount<C: Console>(
    session: &mut Session,
    console: &mut C,
    operation: AmountOperation,
) -> io::Result<()> {
    let label = match operation {
        AmountOperation::Deposit => "Enter deposit amount (or 'cancel'): $",
        AmountOperation::Withdraw => "Enter withdrawal amount (or 'cancel'): $",
    };

    loop {
        let input = match console.prompt(label)? {
            Some(input) if !input.eq_ignore_ascii_case(CANCEL_TOKEN) => input,
            _ => {
                tracing::debug!(?operation, "amount entry cancelled");
                return console.write_line("Transaction cancelled.");
            }
        };

        let result = match operation {
            AmountOperation::Deposit => session.deposit(&input),
            AmountOperation::Withdraw => session.withdraw(&input),
        };

        match result {
            Ok(amount) => {
                let verb = match operation {
                    AmountOperation::Deposit => "deposited",
                    AmountOperation::Withdraw => "withdrawn",
                };

                console.write_line(&format!("{} {verb} successfully.", Money::from(amount)))?;
                return console.write_line(&format!(
                    "Current balance: {}",
                    Money::from(session.balance())
                ));
            }
            Err(SessionError::Amount(err)) => console.write_line(&err.to_string())?,
            Err(err) => return console.write_line(&err.to_string()),
        }
    }
}

fn show_history<C: Console>(session: &Session, console: &mut C) -> io::Result<()> {
    console.write_line("\n--- TRANSACTION HISTORY ---")?;

    if session.history().is_empty() {
        return console.write_line("No transactions yet.");
    }

    for tx in session.history() {
        console.write_line(&tx.to_string())?;
    }

    Ok(())
}

fn exit<C: Console>(session: &mut Session, console: &mut C) -> io::Result<()> {
    session.exit();
    console.write_line("Thank you for using the ATM. Goodbye!")
}
