use thiserror::Error;

#[derive(Error, Debug)]
/// Errors encountered loading a database prior to decryption
pub enum OpenError {
    /// The file does not start with the `PWS3` tag
    #[error("Unsupported file type - not a Password Safe v3 database")]
    BadTag,
    /// The input ended inside the fixed size unencrypted header
    #[error("Corrupt database - header truncated")]
    TruncatedHeader,
    /// The end of file marker separating the data from the HMAC is missing
    #[error("Corrupt database - end of file marker not found")]
    MissingEofMarker,
    /// The encrypted data is not a whole number of cipher blocks
    #[error("Corrupt database - encrypted data of {0} bytes is not block aligned")]
    MisalignedCiphertext(usize),
    /// Fewer than 32 bytes follow the end of file marker
    #[error("Corrupt database - HMAC truncated")]
    TruncatedHmac,
    /// Error encountered reading database
    #[error("IO error reading file - {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors encountered parsing the decrypted records
pub enum RecordError {
    /// A record length was read but the rest of the record is missing
    #[error("Record truncated")]
    TruncatedRecord,
    /// The data ended in the middle of an item, before its end marker
    #[error("Item not terminated by an end marker")]
    MalformedItem,
    /// The decrypted data does not even contain the database header
    #[error("Database header missing")]
    MissingHeader,
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors from invalid cipher parameters or unlock limits
pub enum ConfigurationError {
    /// A cipher was initialised with a key or IV of the wrong size
    #[error("Invalid cipher params - key or IV has the wrong length")]
    InvalidKeyLength,
    /// The database asks for more key stretching than allowed
    #[error("Key stretching needs {requested} iterations, limit is {limit}")]
    TooManyIterations {
        /// Iteration count stored in the database
        requested: u32,
        /// Ceiling from the unlock options
        limit: u32,
    },
}

impl From<cipher::crypto_common::InvalidLength> for ConfigurationError {
    fn from(_: cipher::crypto_common::InvalidLength) -> ConfigurationError {
        ConfigurationError::InvalidKeyLength
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// The decrypted data failed authentication
pub enum IntegrityError {
    /// The HMAC over all field data does not match the stored HMAC
    #[error("HMAC mismatch")]
    HmacMismatch,
    /// The record structure is broken, so the data cannot be authenticated
    ///
    /// This is how malformed records are reported once the password has
    /// been verified. A truncated record, an unterminated item or a
    /// missing header means the decrypted data is not what was written,
    /// so it is treated like a failed HMAC rather than a format error.
    #[error("corrupt records - {0}")]
    CorruptRecords(#[from] RecordError),
}

#[derive(Debug, Error)]
/// Errors encountered unlocking a encrypted database
pub enum UnlockError {
    /// The stretched password does not match the stored verification hash
    #[error("Invalid password")]
    InvalidPassword,
    /// The password was correct but the decrypted data was tampered with or corrupt
    #[error("Integrity check failed - database tampered with or corrupt - {0}")]
    Integrity(#[from] IntegrityError),
    /// Cipher setup failed or unlock limits were exceeded
    #[error("Invalid configuration - {0}")]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Error)]
/// The search expression given to a query is not a valid regex
#[error("Invalid search pattern - {0}")]
pub struct PatternError(#[from] pub regex::Error);
