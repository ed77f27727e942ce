//! .psafe3 files and the binary record format

mod container;
pub(crate) mod errors;
mod field_types;
mod read;
mod record;
mod states;

pub use container::{Container, EOF_MARKER, PWS3_TAG};
pub use field_types::{FieldId, FieldType, HeaderFieldType, END_OF_ITEM};
pub use read::{from_bytes, from_reader, open};
pub use states::{FailedUnlock, Locked, Psafe, PsafeState, Unlocked};
