//! Prints the unencrypted header of a psafe3 database
//!
//! Primarily for investigating the psafe3 format. No password is needed.

use tracing_subscriber::EnvFilter;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn main() -> Result<(), psafe3_rs::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("Usage: psafe3-dump-header <path to psafe3 file>");
            std::process::exit(2);
        }
    };
    let psafe = psafe3_rs::open(path)?;
    let container = psafe.container();
    println!("Iterations: {}", container.iterations);
    println!("Salt: {}", hex(&container.salt));
    println!("Password hash: {}", hex(&container.password_hash));
    println!("IV: {}", hex(&container.iv));
    println!(
        "Encrypted data: {} bytes ({} blocks)",
        container.ciphertext.len(),
        container.ciphertext.len() / 16
    );
    println!("HMAC: {}", hex(&container.hmac));
    Ok(())
}
