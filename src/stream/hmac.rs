use crate::binary::errors::ConfigurationError;
use crate::crypto::HmacKey;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Running HMAC-SHA256 over the payload of every field read
///
/// Length, type and padding bytes are never fed in. The result is only
/// checked once all records have been read.
pub(crate) struct PayloadMac {
    inner: HmacSha256,
}

impl PayloadMac {
    pub(crate) fn new(key: &HmacKey) -> Result<PayloadMac, ConfigurationError> {
        Ok(PayloadMac {
            inner: <HmacSha256 as Mac>::new_from_slice(&key.0)?,
        })
    }

    pub(crate) fn update(&mut self, payload: &[u8]) {
        self.inner.update(payload);
    }

    /// Compare against the stored HMAC in constant time
    pub(crate) fn verify(self, expected: &[u8]) -> bool {
        self.inner.verify_slice(expected).is_ok()
    }

    #[cfg(test)]
    pub(crate) fn finalize_for_test(self) -> Vec<u8> {
        self.inner.finalize().into_bytes().to_vec()
    }
}
