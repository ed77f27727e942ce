//! Shows the credentials of matching psafe3 entries
//!
//! Takes the password on the CLI and prints stored passwords, which is
//! insecure. Only for investigating test databases.

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), psafe3_rs::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: psafe3-show <path to psafe3 file> <password> <pattern>");
        std::process::exit(2);
    }
    let psafe = psafe3_rs::open(&args[1])?.unlock(&args[2])?;
    let header = psafe.header();
    if let Some(name) = header.database_name() {
        println!("Database: {}", name);
    }

    let mut found = 0usize;
    for entry in psafe.find(&args[3])? {
        found += 1;
        println!("{}", entry.display_name());
        println!("\tUsername: {}", entry.username().unwrap_or_default());
        println!("\tPassword: {}", entry.password().unwrap_or_default());
        if let Some(url) = entry.url() {
            println!("\tURL: {}", url);
        }
        if let Some(notes) = entry.notes() {
            println!("\tNotes: {}", notes);
        }
        if let Some(modified) = entry.modified() {
            println!("\tModified: {}", modified);
        }
    }
    tracing::info!(found, "matching entries");
    Ok(())
}
