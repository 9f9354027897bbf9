use std::io;

use thiserror::Error;

use crate::config::Config;
use crate::console::Console;

pub const PIN_LENGTH: usize = 4;

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum PinError {
    #[error("PIN cannot be empty.")]
    Empty,
    #[error("Invalid format. PIN must be exactly 4 digits.")]
    InvalidFormat,
    #[error("Incorrect PIN.")]
    Incorrect,
}

impl PinError {
    /// Blank submissions are re-prompted for free; everything else uses up an attempt.
    pub fn consumes_attempt(&self) -> bool {
        !matches!(self, PinError::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted,
    Denied,
}

pub fn is_valid_pin_format(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

pub struct Authenticator {
    pin: String,
    max_attempts: u32,
}

impl Authenticator {
    pub fn new(config: &Config) -> Self {
        Self {
            pin: config.pin.clone(),
            max_attempts: config.max_pin_attempts,
        }
    }

    pub fn verify(&self, submitted: &str) -> Result<(), PinError> {
        if submitted.is_empty() {
            return Err(PinError::Empty);
        }

        if !is_valid_pin_format(submitted) {
            return Err(PinError::InvalidFormat);
        }

        if submitted != self.pin {
            return Err(PinError::Incorrect);
        }

        Ok(())
    }

    /// Prompts for the PIN until it is accepted or the attempts run out.
    pub fn authenticate<C: Console>(&self, console: &mut C) -> io::Result<AuthOutcome> {
        let mut remaining = self.max_attempts;

        while remaining > 0 {
            let Some(submitted) = console.prompt("Enter your 4-digit PIN: ")? else {
                tracing::warn!("input closed during authentication");
                return Ok(AuthOutcome::Denied);
            };

            let err = match self.verify(&submitted) {
                Ok(()) => {
                    tracing::info!("PIN accepted");
                    console.write_line("PIN accepted. Welcome!")?;
                    return Ok(AuthOutcome::Granted);
                }
                Err(err) => err,
            };

            if !err.consumes_attempt() {
                console.write_line(&err.to_string())?;
                continue;
            }

            remaining -= 1;
            tracing::warn!(reason = %err, remaining, "PIN rejected");
            console.write_line(&format!("{err} {remaining} attempt(s) remaining."))?;
        }

        Ok(AuthOutcome::Denied)
    }
}

#[cfg(test)]
mod test {
    use assert2::{assert, check};
    use indoc::indoc;

    use crate::console::Terminal;

    use super::*;

    fn authenticate(input: &str) -> (AuthOutcome, String) {
        let authenticator = Authenticator::new(&Config::default());
        let mut terminal = Terminal::new(input.as_bytes(), Vec::new());

        let outcome = authenticator.authenticate(&mut terminal).unwrap();

        (outcome, String::from_utf8(terminal.into_output()).unwrap())
    }

    #[test]
    fn test_verify() {
        let authenticator = Authenticator::new(&Config::default());

        check!(authenticator.verify("1234") == Ok(()));
        check!(authenticator.verify("") == Err(PinError::Empty));
        check!(authenticator.verify("0000") == Err(PinError::Incorrect));

        for pin in ["12a4", "123", "12345", " 1234", "+123", "١٢٣٤"] {
            check!(authenticator.verify(pin) == Err(PinError::InvalidFormat), "pin: {pin}");
        }
    }

    #[test]
    fn test_correct_pin_on_last_attempt_is_granted() {
        let (outcome, output) = authenticate(indoc! {"
            0000
            1111
            1234
        "});

        check!(outcome == AuthOutcome::Granted);
        check!(output.contains("Incorrect PIN. 2 attempt(s) remaining."));
        check!(output.contains("Incorrect PIN. 1 attempt(s) remaining."));
        check!(output.ends_with("PIN accepted. Welcome!\n"));
    }

    #[test]
    fn test_correct_pin_short_circuits() {
        let (outcome, output) = authenticate("1234\n0000\n");

        check!(outcome == AuthOutcome::Granted);
        check!(output.matches("Enter your 4-digit PIN: ").count() == 1);
    }

    #[test]
    fn test_three_wrong_pins_are_denied() {
        let (outcome, output) = authenticate(indoc! {"
            0000
            1111
            2222
            1234
        "});

        check!(outcome == AuthOutcome::Denied);
        check!(output.contains("Incorrect PIN. 0 attempt(s) remaining."));
        assert!(!output.contains("PIN accepted"));
    }

    #[test]
    fn test_format_errors_consume_attempts() {
        let (outcome, output) = authenticate(indoc! {"
            12a4
            123
            9999
            1234
        "});

        check!(outcome == AuthOutcome::Denied);
        check!(output.contains("Invalid format. PIN must be exactly 4 digits. 2 attempt(s) remaining."));
        check!(output.contains("Invalid format. PIN must be exactly 4 digits. 1 attempt(s) remaining."));
    }

    #[test]
    fn test_blank_pin_does_not_consume_attempt() {
        let (outcome, output) = authenticate(indoc! {"
            0000

            1111

            1234
        "});

        check!(outcome == AuthOutcome::Granted);
        check!(output.matches("PIN cannot be empty.").count() == 2);
    }

    #[test]
    fn test_end_of_input_denies() {
        let (outcome, _) = authenticate("0000\n");

        check!(outcome == AuthOutcome::Denied);
    }

    #[test]
    fn test_alternate_pin_from_config() {
        let config = Config {
            pin: "4321".to_string(),
            max_pin_attempts: 1,
            ..Config::default()
        };
        let authenticator = Authenticator::new(&config);

        check!(authenticator.verify("4321") == Ok(()));
        check!(authenticator.verify("1234") == Err(PinError::Incorrect));
    }
}
