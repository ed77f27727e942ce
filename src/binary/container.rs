use super::errors::OpenError as Error;
use crate::crypto::{BLOCK_SIZE, KEY_SIZE};

type Result<T> = std::result::Result<T, Error>;

/// Tag at the start of every Password Safe v3 file
pub const PWS3_TAG: &[u8; 4] = b"PWS3";
/// Marker between the encrypted data and the HMAC
pub const EOF_MARKER: &[u8; 16] = b"PWS3-EOFPWS3-EOF";

/// Size of the unencrypted header before the encrypted data
pub(crate) const HEADER_SIZE: usize = 4 + KEY_SIZE + 4 + KEY_SIZE * 3 + BLOCK_SIZE;

#[derive(Debug, PartialEq, Eq, Clone)]
/// Unencrypted layout of a Password Safe v3 file
///
/// Holds the key stretching parameters, the wrapped keys and the still
/// encrypted records. Nothing here is secret without the password.
pub struct Container {
    /// Salt for key stretching
    pub salt: [u8; KEY_SIZE],
    /// Rounds of SHA-256 applied to the password
    pub iterations: u32,
    /// SHA-256 of the stretched password
    pub password_hash: [u8; KEY_SIZE],
    /// Data cipher key, encrypted with the stretched password
    pub wrapped_cipher_key: [u8; KEY_SIZE],
    /// HMAC key, encrypted with the stretched password
    pub wrapped_hmac_key: [u8; KEY_SIZE],
    /// IV for decrypting the records
    pub iv: [u8; BLOCK_SIZE],
    /// Encrypted records, a whole number of blocks
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA256 over the payload of every record
    pub hmac: [u8; KEY_SIZE],
}

/// Reads the fixed size fields at the start of the file in order
struct HeaderReader<'a> {
    data: &'a [u8],
}

impl<'a> HeaderReader<'a> {
    fn read<const N: usize>(&mut self) -> Result<[u8; N]> {
        if self.data.len() < N {
            return Err(Error::TruncatedHeader);
        }
        let (head, tail) = self.data.split_at(N);
        self.data = tail;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }
}

impl Container {
    /// Split a complete file into its parts
    pub fn parse(input: &[u8]) -> Result<Container> {
        if input.len() >= PWS3_TAG.len() && &input[..PWS3_TAG.len()] != PWS3_TAG {
            return Err(Error::BadTag);
        }
        if input.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader);
        }
        let mut reader = HeaderReader { data: input };
        let tag: [u8; 4] = reader.read()?;
        if &tag != PWS3_TAG {
            return Err(Error::BadTag);
        }
        let salt = reader.read()?;
        let iterations = u32::from_le_bytes(reader.read()?);
        let password_hash = reader.read()?;
        let wrapped_cipher_key = reader.read()?;
        let wrapped_hmac_key = reader.read()?;
        let iv = reader.read()?;

        let body = reader.data;
        let eof = body
            .windows(EOF_MARKER.len())
            .position(|window| window == EOF_MARKER)
            .ok_or(Error::MissingEofMarker)?;
        let ciphertext = &body[..eof];
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::MisalignedCiphertext(ciphertext.len()));
        }

        let hmac_start = eof + EOF_MARKER.len();
        let hmac_bytes = body
            .get(hmac_start..hmac_start + KEY_SIZE)
            .ok_or(Error::TruncatedHmac)?;
        let mut hmac = [0u8; KEY_SIZE];
        hmac.copy_from_slice(hmac_bytes);

        Ok(Container {
            salt,
            iterations,
            password_hash,
            wrapped_cipher_key,
            wrapped_hmac_key,
            iv,
            ciphertext: ciphertext.to_vec(),
            hmac,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ciphertext_len: usize) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(PWS3_TAG);
        data.extend_from_slice(&[1u8; 32]);
        data.extend_from_slice(&2048u32.to_le_bytes());
        data.extend_from_slice(&[2u8; 32]);
        data.extend_from_slice(&[3u8; 32]);
        data.extend_from_slice(&[4u8; 32]);
        data.extend_from_slice(&[5u8; 16]);
        data.extend((0..ciphertext_len).map(|i| i as u8));
        data.extend_from_slice(EOF_MARKER);
        data.extend_from_slice(&[6u8; 32]);
        data
    }

    #[test]
    fn parses_fixed_layout() {
        let data = sample(48);
        assert_eq!(HEADER_SIZE, 152);
        let container = Container::parse(&data).unwrap();
        assert_eq!(container.salt, [1u8; 32]);
        assert_eq!(container.iterations, 2048);
        assert_eq!(container.password_hash, [2u8; 32]);
        assert_eq!(container.wrapped_cipher_key, [3u8; 32]);
        assert_eq!(container.wrapped_hmac_key, [4u8; 32]);
        assert_eq!(container.iv, [5u8; 16]);
        assert_eq!(container.ciphertext, (0..48u8).collect::<Vec<_>>());
        assert_eq!(container.hmac, [6u8; 32]);
    }

    #[test]
    fn empty_ciphertext() {
        let container = Container::parse(&sample(0)).unwrap();
        assert!(container.ciphertext.is_empty());
    }

    #[test]
    fn ignores_bytes_after_hmac() {
        let mut data = sample(16);
        data.extend_from_slice(b"trailing");
        assert_eq!(Container::parse(&data).unwrap().hmac, [6u8; 32]);
    }

    #[test]
    fn rejects_bad_tag() {
        let mut data = sample(16);
        data[3] = b'2';
        assert!(matches!(Container::parse(&data), Err(Error::BadTag)));
    }

    #[test]
    fn rejects_truncated_header() {
        let data = sample(16);
        assert!(matches!(
            Container::parse(&data[..100]),
            Err(Error::TruncatedHeader)
        ));
        assert!(matches!(
            Container::parse(&data[..2]),
            Err(Error::TruncatedHeader)
        ));
    }

    #[test]
    fn header_size_matches_layout() {
        let data = sample(0);
        assert_eq!(HEADER_SIZE, 4 + 32 + 4 + 32 + 32 + 32 + 16);
        assert_eq!(data.len(), HEADER_SIZE + EOF_MARKER.len() + 32);
        assert_eq!(&data[HEADER_SIZE..HEADER_SIZE + 16], EOF_MARKER);
        assert!(matches!(
            Container::parse(&data[..HEADER_SIZE - 1]),
            Err(Error::TruncatedHeader)
        ));
        assert!(matches!(
            Container::parse(&data[..HEADER_SIZE]),
            Err(Error::MissingEofMarker)
        ));
    }

    #[test]
    fn rejects_missing_marker() {
        let mut data = sample(16);
        let marker_at = HEADER_SIZE + 16;
        data[marker_at + 4] = b'X';
        assert!(matches!(
            Container::parse(&data),
            Err(Error::MissingEofMarker)
        ));
    }

    #[test]
    fn rejects_misaligned_ciphertext() {
        assert!(matches!(
            Container::parse(&sample(17)),
            Err(Error::MisalignedCiphertext(17))
        ));
    }

    #[test]
    fn rejects_truncated_hmac() {
        let data = sample(16);
        assert!(matches!(
            Container::parse(&data[..data.len() - 1]),
            Err(Error::TruncatedHmac)
        ));
    }
}
