//! Writes psafe3 files for the integration tests
//!
//! The library only reads databases, so fixtures are encrypted here with
//! the RustCrypto primitives directly.

#![allow(dead_code)]

use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};
use twofish::Twofish;

pub const PASSWORD: &str = "bogus12345";
pub const ITERATIONS: u32 = 2048;
pub const HEADER_SIZE: usize = 152;
pub const EOF_MARKER: &[u8; 16] = b"PWS3-EOFPWS3-EOF";

pub type Record = (u8, Vec<u8>);

/// Header and entries, each without its end marker
pub struct Database {
    pub header: Vec<Record>,
    pub entries: Vec<Vec<Record>>,
}

fn random<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::thread_rng().fill_bytes(&mut out);
    out
}

fn stretch(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    let mut key: [u8; 32] = hasher.finalize().into();
    for _ in 0..iterations {
        key = Sha256::digest(key).into();
    }
    key
}

fn encrypt_ecb(key: &[u8], data: &[u8; 32]) -> [u8; 32] {
    let cipher = Twofish::new_from_slice(key).unwrap();
    let mut out = *data;
    for block in out.chunks_mut(16) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    out
}

fn encrypt_cbc(key: &[u8], iv: &[u8; 16], plaintext: &[u8]) -> Vec<u8> {
    assert_eq!(plaintext.len() % 16, 0);
    let cipher = Twofish::new_from_slice(key).unwrap();
    let mut chain = *iv;
    let mut out = Vec::with_capacity(plaintext.len());
    for block in plaintext.chunks(16) {
        let mut buf = [0u8; 16];
        for (b, (p, c)) in buf.iter_mut().zip(block.iter().zip(chain.iter())) {
            *b = p ^ c;
        }
        cipher.encrypt_block(GenericArray::from_mut_slice(&mut buf));
        out.extend_from_slice(&buf);
        chain = buf;
    }
    out
}

/// Serialise one record with random padding
pub fn record(ty: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.push(ty);
    out.extend_from_slice(payload);
    let padding = (16 - (5 + payload.len()) % 16) % 16;
    let mut pad = vec![0u8; padding];
    rand::thread_rng().fill_bytes(&mut pad);
    out.extend_from_slice(&pad);
    out
}

/// Plaintext records and the payloads the HMAC covers
pub fn serialise(db: &Database) -> (Vec<u8>, Vec<Vec<u8>>) {
    let mut plaintext = Vec::new();
    let mut payloads = Vec::new();
    let end: Record = (0xff, Vec::new());
    for item in std::iter::once(&db.header).chain(db.entries.iter()) {
        for (ty, data) in item.iter().chain(std::iter::once(&end)) {
            plaintext.extend(record(*ty, data));
            payloads.push(data.clone());
        }
    }
    (plaintext, payloads)
}

/// Encrypt already serialised records, with the HMAC over `payloads`
pub fn seal(password: &str, iterations: u32, plaintext: &[u8], payloads: &[Vec<u8>]) -> Vec<u8> {
    let salt: [u8; 32] = random();
    let iv: [u8; 16] = random();
    let cipher_key: [u8; 32] = random();
    let hmac_key: [u8; 32] = random();
    let stretched = stretch(password, &salt, iterations);

    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&hmac_key).unwrap();
    for payload in payloads {
        mac.update(payload);
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"PWS3");
    out.extend_from_slice(&salt);
    out.extend_from_slice(&iterations.to_le_bytes());
    out.extend_from_slice(&Sha256::digest(stretched));
    out.extend_from_slice(&encrypt_ecb(&stretched, &cipher_key));
    out.extend_from_slice(&encrypt_ecb(&stretched, &hmac_key));
    out.extend_from_slice(&iv);
    out.extend(encrypt_cbc(&cipher_key, &iv, plaintext));
    out.extend_from_slice(EOF_MARKER);
    out.extend_from_slice(&mac.finalize().into_bytes());
    out
}

pub fn encode(password: &str, iterations: u32, db: &Database) -> Vec<u8> {
    let (plaintext, payloads) = serialise(db);
    seal(password, iterations, &plaintext, &payloads)
}

fn text(ty: u8, value: &str) -> Record {
    (ty, value.as_bytes().to_vec())
}

fn entry(group: Option<&str>, title: &str, username: &str, password: &str) -> Vec<Record> {
    let mut fields = vec![(0x01, random::<16>().to_vec())];
    if let Some(group) = group {
        fields.push(text(0x02, group));
    }
    fields.push(text(0x03, title));
    fields.push(text(0x04, username));
    fields.push(text(0x06, password));
    fields.push((0x07, 1_400_000_000u32.to_le_bytes().to_vec()));
    fields
}

/// The nine entry test database, in the order they are stored
pub fn sample_database() -> Database {
    let mut eight = entry(None, "Test eight", "user8", "my password");
    eight.push(text(0x05, "shift double click action set = run command"));
    eight.push((0x17, 9u16.to_le_bytes().to_vec()));

    let four = entry(None, "Test Four", "user4", "pass4");
    let one_second = entry(Some("Test"), "Test One", "user2", "password2");
    let one_first = entry(Some("Test"), "Test One", "user1", "password1");

    let mut seven = entry(None, "Test seven", "user7", "my password");
    seven.push(text(0x05, "Symbols set for password generation"));
    seven.push(text(0x16, "#$%"));

    let two = entry(None, "Test Two", "user3", "pass3");

    let mut nine = entry(Some("Test"), "Test Nine", "user9", "DoubleClickActionTest");
    nine.push((0x13, 5u16.to_le_bytes().to_vec()));

    let mut six = entry(None, "Test six", "user6", "my password");
    six.push(text(0x05, "protected entry"));
    six.push((0x15, vec![1]));

    let mut five = entry(None, "Test Five", "user5", "my password");
    five.push(text(0x05, "email address test"));
    five.push(text(0x14, "test@example.com"));

    Database {
        header: vec![
            (0x00, vec![0x0d, 0x03]),
            (0x01, random::<16>().to_vec()),
            text(0x06, "psafe3-rs tests"),
            text(0x09, "Test Database"),
        ],
        entries: vec![
            eight, four, one_second, one_first, seven, two, nine, six, five,
        ],
    }
}

pub fn sample_file() -> Vec<u8> {
    encode(PASSWORD, ITERATIONS, &sample_database())
}
