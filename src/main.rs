use std::io;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atm::config::Config;
use atm::console::Terminal;
use atm::statement::write_statement;

/// Console ATM simulator with an in-memory account.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Reference PIN (exactly 4 digits)
    #[arg(long, env = "ATM_PIN", default_value = "1234")]
    pin: String,

    /// PIN submissions allowed before access is denied
    #[arg(long, env = "ATM_MAX_PIN_ATTEMPTS", default_value_t = 3)]
    max_pin_attempts: u32,

    /// Smallest amount accepted for a deposit or withdrawal
    #[arg(long, env = "ATM_MIN_AMOUNT", default_value = "1.00")]
    min_amount: Decimal,

    /// Largest amount accepted for a deposit or withdrawal
    #[arg(long, env = "ATM_MAX_AMOUNT", default_value = "10000.00")]
    max_amount: Decimal,

    /// Opening balance of the account
    #[arg(long, env = "ATM_INITIAL_BALANCE", default_value = "1000.00")]
    initial_balance: Decimal,

    /// Fractional digits kept on amounts and balances
    #[arg(long, env = "ATM_SCALE", default_value_t = 2)]
    scale: u32,

    /// Leave the opening balance out of the transaction history
    #[arg(long)]
    no_opening_entry: bool,

    /// Print the transaction history as CSV after the session ends
    #[arg(long)]
    statement: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            pin: args.pin,
            max_pin_attempts: args.max_pin_attempts,
            min_amount: args.min_amount,
            max_amount: args.max_amount,
            initial_balance: args.initial_balance,
            scale: args.scale,
            record_opening_balance: !args.no_opening_entry,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atm=warn")))
        .init();

    let args = Args::parse();
    let print_statement = args.statement;

    let config = Config::from(args);
    config.validate().context("Invalid configuration")?;

    let mut terminal = Terminal::stdio();
    let session = atm::atm::run(&config, &mut terminal).context("Console I/O failed")?;

    if let Some(session) = session.filter(|_| print_statement) {
        write_statement(session.history(), terminal.into_output())
            .context("Failed producing statement")?;
    }

    Ok(())
}
