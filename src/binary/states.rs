use super::{errors, record, Container};
use crate::crypto::{self, UnlockOptions};
use crate::{stream, types};
use std::ops::Deref;

/// Lock state of a [`Psafe`]
pub trait PsafeState: std::fmt::Debug {
    /// Unencrypted layout of the file
    fn container(&self) -> &Container;
}

#[derive(Debug)]
/// A Password Safe v3 file
///
/// Most methods are available on a specific state like `Psafe<Locked>`
/// or `Psafe<Unlocked>`.
///
/// A locked file can be obtained with [`psafe3_rs::open`][crate::open],
/// [`psafe3_rs::from_reader`][crate::from_reader] or
/// [`psafe3_rs::from_bytes`][crate::from_bytes].
pub struct Psafe<S>
where
    S: PsafeState,
{
    pub(super) state: S,
}

impl<T: PsafeState> Psafe<T> {
    /// Unencrypted key stretching parameters and encrypted data
    pub fn container(&self) -> &Container {
        self.state.container()
    }

    /// Number of key stretching iterations
    pub fn iterations(&self) -> u32 {
        self.state.container().iterations
    }
}

/// Represents a failed attempt at unlocking a database
///
/// Includes the locked database and the reason the unlock failed.
/// This allows you to keep the database for interactive use and
/// e.g. prompt the user for a new password if the password was wrong.
///
/// For unscripted use, `FailedUnlock` converts into
/// [`psafe3_rs::Error`][crate::Error] and
/// [`UnlockError`][crate::errors::UnlockError] for use with the `?` operator.
#[derive(Debug)]
pub struct FailedUnlock(pub Psafe<Locked>, pub errors::UnlockError);

impl From<FailedUnlock> for errors::UnlockError {
    fn from(funlock: FailedUnlock) -> errors::UnlockError {
        funlock.1
    }
}

#[derive(Debug)]
/// An unlocked psafe3 file, allowing access to stored credentials
pub struct Unlocked {
    /// Unencrypted layout the data was decrypted from
    pub(crate) container: Container,
    /// Decrypted and verified records
    pub(crate) keychain: types::Keychain,
}

impl PsafeState for Unlocked {
    fn container(&self) -> &Container {
        &self.container
    }
}

impl Psafe<Unlocked> {
    /// Password database stored in this file
    pub fn keychain(&self) -> &types::Keychain {
        &self.state.keychain
    }

    /// Take the password database, dropping the encrypted data
    pub fn into_keychain(self) -> types::Keychain {
        self.state.keychain
    }
}

impl Deref for Psafe<Unlocked> {
    type Target = types::Keychain;

    fn deref(&self) -> &types::Keychain {
        &self.state.keychain
    }
}

#[derive(Debug, PartialEq, Eq)]
/// A locked psafe3 file, use unlock(password) to unlock
pub struct Locked {
    /// Unencrypted layout and encrypted records
    pub(crate) container: Container,
}

impl PsafeState for Locked {
    fn container(&self) -> &Container {
        &self.container
    }
}

impl Psafe<Locked> {
    fn decrypt(
        &self,
        password: &str,
        options: &UnlockOptions,
    ) -> Result<types::Keychain, errors::UnlockError> {
        let container = &self.state.container;
        options.check_iterations(container.iterations)?;

        let stretched = crypto::stretch(password, &container.salt, container.iterations);
        if !stretched.verify(&container.password_hash) {
            tracing::debug!("stretched password does not match stored hash");
            return Err(errors::UnlockError::InvalidPassword);
        }

        let (cipher_key, hmac_key) =
            stretched.unwrap_keys(&container.wrapped_cipher_key, &container.wrapped_hmac_key)?;
        drop(stretched);

        let plaintext = stream::decrypt_cbc(&cipher_key, &container.iv, &container.ciphertext)?;
        drop(cipher_key);

        let mut mac = stream::PayloadMac::new(&hmac_key)?;
        drop(hmac_key);

        let keychain = record::read_keychain(&plaintext, &mut mac).map_err(|e| {
            tracing::warn!(error = %e, "decrypted records are corrupt");
            errors::IntegrityError::from(e)
        })?;
        drop(plaintext);

        if !mac.verify(&container.hmac) {
            tracing::warn!("HMAC mismatch, database tampered with or corrupt");
            return Err(errors::IntegrityError::HmacMismatch.into());
        }
        Ok(keychain)
    }

    /// Unlocks the psafe3 file with the default [`UnlockOptions`]
    ///
    /// If unlock fails, returns the locked file along with the error
    pub fn unlock(self, password: &str) -> Result<Psafe<Unlocked>, FailedUnlock> {
        self.unlock_with(password, &UnlockOptions::default())
    }

    /// Unlocks the psafe3 file with custom limits
    ///
    /// No entries are available unless the password matches and the
    /// HMAC over all records verifies. If unlock fails, returns the
    /// locked file along with the error.
    pub fn unlock_with(
        self,
        password: &str,
        options: &UnlockOptions,
    ) -> Result<Psafe<Unlocked>, FailedUnlock> {
        match self.decrypt(password, options) {
            Ok(keychain) => {
                tracing::debug!(entries = keychain.len(), "unlocked database");
                Ok(Psafe {
                    state: Unlocked {
                        container: self.state.container,
                        keychain,
                    },
                })
            }
            Err(e) => Err(FailedUnlock(self, e)),
        }
    }
}
