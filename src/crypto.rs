use crate::binary::errors::ConfigurationError;

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, KeyInit};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use twofish::Twofish;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of every key and hash used by the format
pub(crate) const KEY_SIZE: usize = 32;
/// Twofish block size
pub(crate) const BLOCK_SIZE: usize = 16;

/// Default ceiling on key stretching iterations accepted from a file
pub const DEFAULT_MAX_ITERATIONS: u32 = 1 << 24;

/// Limits applied while unlocking a database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockOptions {
    /// Largest iteration count a database may request for key stretching
    ///
    /// Databases asking for more are rejected with
    /// [`ConfigurationError::TooManyIterations`] instead of hashing for
    /// an unbounded amount of time.
    pub max_iterations: u32,
}

impl Default for UnlockOptions {
    fn default() -> UnlockOptions {
        UnlockOptions {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl UnlockOptions {
    pub(crate) fn check_iterations(&self, iterations: u32) -> Result<(), ConfigurationError> {
        if iterations > self.max_iterations {
            Err(ConfigurationError::TooManyIterations {
                requested: iterations,
                limit: self.max_iterations,
            })
        } else {
            Ok(())
        }
    }
}

/// Password after key stretching - used to verify the password and unwrap the keys
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct StretchedPassword([u8; KEY_SIZE]);

/// Stretch a password with `iterations` rounds of SHA-256 over `password || salt`
pub(crate) fn stretch(password: &str, salt: &[u8], iterations: u32) -> StretchedPassword {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);

    let mut stretched = StretchedPassword([0u8; KEY_SIZE]);
    stretched.0.copy_from_slice(&hasher.finalize());
    for _ in 0..iterations {
        let mut next = Sha256::digest(&stretched.0);
        stretched.0.copy_from_slice(&next);
        next.as_mut_slice().zeroize();
    }
    stretched
}

impl StretchedPassword {
    /// Check the password against the hash stored in the database
    pub(crate) fn verify(&self, expected_hash: &[u8]) -> bool {
        let mut hash = Sha256::digest(&self.0);
        let matches = constant_time_eq(&hash, expected_hash);
        hash.as_mut_slice().zeroize();
        matches
    }

    /// Decrypt the two wrapped keys stored in the database header
    pub(crate) fn unwrap_keys(
        &self,
        wrapped_cipher_key: &[u8],
        wrapped_hmac_key: &[u8],
    ) -> Result<(CipherKey, HmacKey), ConfigurationError> {
        let mut cipher_key = CipherKey([0u8; KEY_SIZE]);
        let mut hmac_key = HmacKey([0u8; KEY_SIZE]);
        decrypt_ecb(&self.0, wrapped_cipher_key, &mut cipher_key.0)?;
        decrypt_ecb(&self.0, wrapped_hmac_key, &mut hmac_key.0)?;
        Ok((cipher_key, hmac_key))
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Key for the bulk data cipher
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct CipherKey(pub(crate) [u8; KEY_SIZE]);

/// Key for the HMAC over all field data
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct HmacKey(pub(crate) [u8; KEY_SIZE]);

/// Decrypt each 16 byte block of `input` on its own, no chaining or IV
fn decrypt_ecb(key: &[u8], input: &[u8], output: &mut [u8]) -> Result<(), ConfigurationError> {
    if input.len() != output.len() || input.len() % BLOCK_SIZE != 0 {
        return Err(ConfigurationError::InvalidKeyLength);
    }
    let cipher = Twofish::new_from_slice(key)?;
    output.copy_from_slice(input);
    for block in output.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(())
}

/// Compare two byte strings without stopping at the first difference
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
