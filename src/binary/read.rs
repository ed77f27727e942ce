use super::{errors, Container, Locked, Psafe};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a database from a input stream
///
/// The whole stream is read before parsing starts.
/// The database starts locked, use [`Psafe::unlock`] to unlock
pub fn from_reader<R: Read>(mut input: R) -> Result<Psafe<Locked>, errors::OpenError> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    from_bytes(&data)
}

/// Read a database already loaded into memory
///
/// The database starts locked, use [`Psafe::unlock`] to unlock
pub fn from_bytes(data: &[u8]) -> Result<Psafe<Locked>, errors::OpenError> {
    let container = Container::parse(data)?;
    tracing::debug!(
        iterations = container.iterations,
        encrypted_bytes = container.ciphertext.len(),
        "read database container"
    );
    Ok(Psafe {
        state: Locked { container },
    })
}

/// Read a database from a given path
///
/// The database starts locked, use [`Psafe::unlock`] to unlock
pub fn open<P: AsRef<Path>>(path: P) -> Result<Psafe<Locked>, errors::OpenError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    from_reader(&mut file)
}
