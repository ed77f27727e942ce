//! Lists the entries of a psafe3 database
//!
//! Takes the password on the CLI, which is insecure. An optional third
//! argument filters entries by a case insensitive regex.

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), psafe3_rs::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: psafe3-list <path to psafe3 file> <password> [pattern]");
        std::process::exit(2);
    }
    let psafe = psafe3_rs::open(&args[1])?.unlock(&args[2])?;
    let pattern = args.get(3).map(String::as_str).unwrap_or("");
    for entry in psafe.find(pattern)? {
        println!("{}", entry.display_name());
    }
    Ok(())
}
