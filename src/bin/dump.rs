//! Dump the chunks of a palette file with byte offsets for debugging
//!
//! Records in color list chunks are printed in the human readable form using
//! the type codes declared by the handler map chunks seen so far.
//!
//! Here is some sample output:
//!
//! ```text
//!          0: "GPA version 0.1" (4 bytes)
//!         28: "handler_map" (23 bytes)
//!               0 = color
//!               1 = string
//!         75: "color_list" (50 bytes)
//! <name type="string">Red</name>
//! <color type="color">1 0 0 1</color>
//!        149: "color_positions" (4 bytes)
//!               0
//! ```

use gpa::{
    ChunkReader, ChunkScan, HandlerMap, MapDecoder, TextWriterBuilder, COLOR_LIST_TAG,
    COLOR_POSITIONS_TAG, HANDLER_MAP_TAG,
};
use std::error;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file>", args[0]);
        std::process::exit(1);
    }

    let file = File::open(&args[1])?;
    let mut reader = ChunkReader::new(BufReader::new(file))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut handlers = HandlerMap::new();

    loop {
        let offset = reader.position()?;
        let header = match reader.next_chunk()? {
            ChunkScan::Chunk(header) => header,
            ChunkScan::EndOfContainer => break,
        };

        let tag = String::from_utf8_lossy(header.tag()).into_owned();
        writeln!(out, "{:>10}: {:?} ({} bytes)", offset, tag, header.size())?;

        if header.is(HANDLER_MAP_TAG) {
            let declared = reader.read_payload(&header, |payload| HandlerMap::read(payload))?;
            for name in declared.names() {
                let code = handlers.push(name)?;
                writeln!(out, "{:>14} = {}", code, name)?;
            }
        } else if header.is(COLOR_LIST_TAG) {
            let decoder = MapDecoder::new(&handlers);
            reader.read_payload(&header, |payload| {
                let mut writer = TextWriterBuilder::new()
                    .declaration(false)
                    .from_writer(&mut out);
                while payload.limit() > 0 {
                    let record = decoder.decode(payload)?;
                    writer.write_map(&record)?;
                }
                Ok(())
            })?;
        } else if header.is(COLOR_POSITIONS_TAG) {
            let data = reader.read_payload(&header, |payload| {
                let mut data = Vec::new();
                payload.read_to_end(&mut data)?;
                Ok(data)
            })?;

            for position in data.chunks_exact(4) {
                let position =
                    u32::from_le_bytes([position[0], position[1], position[2], position[3]]);
                writeln!(out, "{:>14}", position)?;
            }
        } else {
            reader.skip_chunk(&header)?;
        }
    }

    Ok(())
}
