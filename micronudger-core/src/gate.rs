//! Passphrase gate. A convenience lock for a shared device, not a security boundary.

use sha2::{Digest, Sha256};

use crate::error::PassphraseError;
use crate::store::LocalData;

pub fn hash_passphrase(passphrase: &str) -> String {
    hex::encode(Sha256::digest(passphrase.as_bytes()))
}

/// What the gate asks for, depending on whether a passphrase exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    Create,
    Unlock,
}

impl GateMode {
    pub fn for_data(data: &LocalData) -> Self {
        if data.pref.pass_hash.is_some() {
            GateMode::Unlock
        } else {
            GateMode::Create
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GateMode::Create => "Welcome",
            GateMode::Unlock => "Unlock",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            GateMode::Create => "Create a passphrase to lock your coach.",
            GateMode::Unlock => "Enter your passphrase to unlock.",
        }
    }
}

/// The "unlocked this session" flag.
#[derive(Debug, Default)]
pub struct Session {
    unlocked: bool,
}

impl Session {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    /// Set the first passphrase and unlock. The caller persists `data`.
    pub fn create(
        &mut self,
        data: &mut LocalData,
        passphrase: &str,
        confirmation: &str,
    ) -> Result<(), PassphraseError> {
        if data.pref.pass_hash.is_some() {
            return Err(PassphraseError::AlreadySet);
        }
        if passphrase.is_empty() {
            return Err(PassphraseError::Empty);
        }
        if passphrase != confirmation {
            return Err(PassphraseError::Mismatch);
        }

        data.pref.pass_hash = Some(hash_passphrase(passphrase));
        self.unlocked = true;
        Ok(())
    }

    pub fn unlock(&mut self, data: &LocalData, passphrase: &str) -> Result<(), PassphraseError> {
        let stored = data.pref.pass_hash.as_deref().ok_or(PassphraseError::NotSet)?;
        if passphrase.is_empty() {
            return Err(PassphraseError::Empty);
        }
        if hash_passphrase(passphrase) != stored {
            return Err(PassphraseError::Incorrect);
        }

        self.unlocked = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_passphrase("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn create_then_unlock() {
        let mut data = LocalData::default();
        let mut session = Session::default();
        assert_eq!(GateMode::for_data(&data), GateMode::Create);

        assert_eq!(
            session.create(&mut data, "tulip", "tulips"),
            Err(PassphraseError::Mismatch)
        );
        assert_eq!(session.create(&mut data, "", ""), Err(PassphraseError::Empty));
        assert!(!session.is_unlocked());

        session.create(&mut data, "tulip", "tulip").unwrap();
        assert!(session.is_unlocked());
        assert_eq!(GateMode::for_data(&data), GateMode::Unlock);

        session.lock();
        assert!(!session.is_unlocked());
        assert_eq!(session.unlock(&data, "rose"), Err(PassphraseError::Incorrect));
        session.unlock(&data, "tulip").unwrap();
        assert!(session.is_unlocked());
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let mut data = LocalData::default();
        let mut session = Session::default();
        session.create(&mut data, "a", "a").unwrap();
        assert_eq!(
            session.create(&mut data, "b", "b"),
            Err(PassphraseError::AlreadySet)
        );
    }

    #[test]
    fn unlock_without_passphrase_is_rejected() {
        let mut session = Session::default();
        assert_eq!(
            session.unlock(&LocalData::default(), "x"),
            Err(PassphraseError::NotSet)
        );
    }
}
