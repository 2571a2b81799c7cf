//! Export the entries of a palette file as a human readable document
//!
//! Entries are written to stdout in display order, hidden entries included.

use gpa::{Entry, TextWriterBuilder, Value};
use std::error;
use std::io::{self, BufWriter, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let mut entries: Vec<Entry> = Vec::new();
    gpa::load(&args[1], &mut entries)?;

    let stdout = io::stdout();
    let mut writer = TextWriterBuilder::new().from_writer(BufWriter::new(stdout.lock()));
    writer.write_root_start()?;
    for entry in &entries {
        let mut record = entry.to_map();
        record.set("visible", entry.visible);
        if let Some(position) = entry.position.and_then(|x| i32::try_from(x).ok()) {
            record.set("position", position);
        }
        writer.write_field("entry", &Value::Map(record))?;
    }
    writer.write_root_end()?;
    writer.into_inner().flush()?;

    Ok(())
}
