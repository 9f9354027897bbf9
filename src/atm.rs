use std::io;

use crate::auth::{AuthOutcome, Authenticator};
use crate::config::Config;
use crate::console::Console;
use crate::menu;
use crate::session::Session;

/// Runs one ATM visit: authenticate, then serve the menu until exit.
///
/// Returns the finished session, or `None` when access was denied and no menu was shown.
pub fn run<C: Console>(config: &Config, console: &mut C) -> io::Result<Option<Session>> {
    console.write_line("Welcome to the ATM!")?;

    let authenticator = Authenticator::new(config);

    if authenticator.authenticate(console)? == AuthOutcome::Denied {
        tracing::warn!("access denied");
        console.write_line("Too many failed attempts. Access denied. Please contact your bank.")?;
        return Ok(None);
    }

    let mut session = Session::new(config);
    menu::run(&mut session, console)?;

    Ok(Some(session))
}
