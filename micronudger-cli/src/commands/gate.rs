use anyhow::Result;
use micronudger_core::PassphraseError;
use micronudger_core::gate::{GateMode, Session};
use micronudger_core::store::{DataStore, LocalData};
use owo_colors::OwoColorize;

const MAX_ATTEMPTS: usize = 3;

/// Ask for the passphrase (or create one) until the session is unlocked.
pub fn open(store: &DataStore, data: &mut LocalData, session: &mut Session) -> Result<()> {
    let mode = GateMode::for_data(data);
    println!("{}", mode.title().bold());
    println!("{}", mode.prompt().dimmed());

    for _ in 0..MAX_ATTEMPTS {
        let passphrase = rpassword::prompt_password("  Passphrase: ")?;

        let result = match mode {
            GateMode::Unlock => session.unlock(data, &passphrase),
            GateMode::Create => {
                let confirmation = if passphrase.is_empty() {
                    String::new()
                } else {
                    rpassword::prompt_password("  Confirm passphrase: ")?
                };
                session.create(data, &passphrase, &confirmation)
            }
        };

        match result {
            Ok(()) => {
                if mode == GateMode::Create {
                    store.save(data)?;
                }
                return Ok(());
            }
            Err(e @ (PassphraseError::Empty
            | PassphraseError::Mismatch
            | PassphraseError::Incorrect)) => {
                eprintln!("  {}", e.to_string().red());
            }
            Err(e) => return Err(e.into()),
        }
    }

    anyhow::bail!("Too many attempts, still locked.")
}
