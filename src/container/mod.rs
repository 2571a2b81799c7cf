//! Framing of a byte stream into tagged, length prefixed chunks.
//!
//! Every chunk starts with a 24 byte [ChunkHeader]: a 16 byte zero padded
//! tag (the last byte is always zero) and the little endian 64 bit size of
//! the payload that follows. Readers skip chunks they don't recognize, which
//! lets newer writers add chunks without breaking older readers.

mod header;
mod reader;
mod writer;

pub use self::header::{ChunkHeader, TAG_SIZE};
pub use self::reader::{ChunkReader, ChunkScan};
pub use self::writer::ChunkWriter;
