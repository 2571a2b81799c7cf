//! Convert the entries of a palette file to JSON
//!
//! Entries are written to stdout in display order, hidden entries included.

use gpa::Entry;
use std::error;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let mut entries: Vec<Entry> = Vec::new();
    gpa::load(&args[1], &mut entries)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &entries)?;
    writeln!(out)?;

    Ok(())
}
