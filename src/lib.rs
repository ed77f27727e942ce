#![deny(missing_docs)]

//! Module to read Password Safe v3 (.psafe3) database files.
//!
//! The main types in this crate are:
//!
//! * [`Psafe`] which represents a database file, locked or unlocked
//! * [`Keychain`] which holds the decrypted header and entries
//!
//! # Opening a database
//!
//! Databases can be read with the [`psafe3_rs::open`] function. This provides
//! access to the unencrypted key stretching parameters. It can then be
//! unlocked by providing the password to the [`Psafe.unlock`] method.
//!
//! Unlocking only succeeds once the password is verified and the HMAC over
//! every record matches, there is no partially unlocked state.
//!
//! ```no_run
//! # fn main() -> Result<(), psafe3_rs::Error> {
//! let psafe = psafe3_rs::open("./simple.psafe3")?;
//! let unlocked = psafe.unlock("bogus12345")?;
//! for entry in unlocked.find("^Test Four$")? {
//!     println!("{} {:?}", entry, entry.username());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A failed unlock hands back the locked database in [`FailedUnlock`]
//! so the caller can try again with another password.
//!
//! Alternatively, [`psafe3_rs::from_reader`] or [`psafe3_rs::from_bytes`]
//! can be used to open a database from a non file source.
//!
//! [`FailedUnlock`]: crate::FailedUnlock
//! [`Keychain`]: crate::Keychain
//! [`Psafe`]: crate::Psafe
//! [`Psafe.unlock`]: crate::Psafe#method.unlock
//! [`psafe3_rs::from_bytes`]: crate::from_bytes
//! [`psafe3_rs::from_reader`]: crate::from_reader
//! [`psafe3_rs::open`]: crate::open

pub mod binary;
mod crypto;
pub mod errors;
mod stream;
mod types;

pub use crate::types::Keychain;
/// Password database datatypes
pub mod database {
    pub use crate::binary::{FieldId, FieldType, HeaderFieldType};
    pub use crate::types::*;
}
pub use binary::{from_bytes, from_reader, open, FailedUnlock, Locked, Psafe, Unlocked};
pub use crypto::{UnlockOptions, DEFAULT_MAX_ITERATIONS};
pub use errors::Error;
