use super::ChunkHeader;
use crate::Error;
use std::io::{Seek, SeekFrom, Write};

/// Writes chunks to a seekable stream.
///
/// Chunks whose size is not known up front reserve their header, let the
/// payload be written, then seek back to patch in the final size.
///
/// ```
/// use gpa::ChunkWriter;
/// use std::io::{Cursor, Write};
///
/// let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
/// let size = writer.write_chunk("notes", |out| {
///     out.write_all(b"abc")?;
///     Ok(())
/// })?;
/// assert_eq!(size, 3);
///
/// let data = writer.into_inner().into_inner();
/// assert_eq!(&data[..5], b"notes");
/// assert_eq!(data[16], 3);
/// assert_eq!(&data[24..], b"abc");
/// # Ok::<(), gpa::Error>(())
/// ```
#[derive(Debug)]
pub struct ChunkWriter<W> {
    writer: W,
}

impl<W> ChunkWriter<W>
where
    W: Write + Seek,
{
    /// Wraps a stream. Chunks are written from its current position.
    pub fn new(writer: W) -> Self {
        ChunkWriter { writer }
    }

    /// Writes a chunk whose payload is produced by the closure and returns
    /// the payload size.
    ///
    /// The closure must leave the stream positioned at the end of what it
    /// wrote.
    pub fn write_chunk<F>(&mut self, tag: &str, f: F) -> Result<u64, Error>
    where
        F: FnOnce(&mut W) -> Result<(), Error>,
    {
        let start = self.writer.stream_position()?;
        ChunkHeader::new(tag, 0).write(&mut self.writer)?;
        f(&mut self.writer)?;

        let end = self.writer.stream_position()?;
        let size = end.saturating_sub(start + ChunkHeader::SIZE as u64);
        self.writer.seek(SeekFrom::Start(start))?;
        ChunkHeader::new(tag, size).write(&mut self.writer)?;
        self.writer.seek(SeekFrom::Start(end))?;

        tracing::trace!(tag, offset = start, size, "wrote chunk");
        Ok(size)
    }

    /// Writes a chunk whose payload is already in memory
    pub fn write_chunk_bytes(&mut self, tag: &str, payload: &[u8]) -> Result<(), Error> {
        ChunkHeader::new(tag, payload.len() as u64).write(&mut self.writer)?;
        self.writer.write_all(payload)?;
        tracing::trace!(tag, size = payload.len(), "wrote chunk");
        Ok(())
    }

    /// Get a mutable reference to the underlying stream
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the chunk writer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.writer
    }
}
