use crate::binary::errors::ConfigurationError;
use crate::crypto;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, KeyIvInit};
use twofish::Twofish;
use zeroize::Zeroizing;

/// Decrypt the database body with Twofish in CBC mode
///
/// No padding is stripped, the record structure decides where the
/// content ends. The caller must pass whole blocks.
pub(crate) fn decrypt_cbc(
    key: &crypto::CipherKey,
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, ConfigurationError> {
    if ciphertext.len() % crypto::BLOCK_SIZE != 0 {
        return Err(ConfigurationError::InvalidKeyLength);
    }
    let mut cipher = cbc::Decryptor::<Twofish>::new_from_slices(&key.0, iv)?;
    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    for block in plaintext.chunks_exact_mut(crypto::BLOCK_SIZE) {
        cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
    }
    Ok(plaintext)
}
