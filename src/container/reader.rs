use super::ChunkHeader;
use crate::{Error, ErrorKind};
use std::io::{Read, Seek, SeekFrom, Take};

/// The outcome of advancing to the next chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkScan {
    /// A valid header. The stream is positioned at the start of its payload.
    Chunk(ChunkHeader),

    /// The container ended cleanly on a chunk boundary
    EndOfContainer,
}

/// Reads chunks from a seekable stream.
///
/// The reader knows the length of the stream so that it can distinguish a
/// container that ends after its last chunk (success) from one that is cut
/// off in the middle of a chunk (failure).
///
/// ```
/// use gpa::{ChunkReader, ChunkScan, ChunkWriter};
/// use std::io::Cursor;
///
/// let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
/// writer.write_chunk_bytes("greeting", b"hello")?;
/// let data = writer.into_inner().into_inner();
///
/// let mut reader = ChunkReader::new(Cursor::new(data))?;
/// let ChunkScan::Chunk(header) = reader.next_chunk()? else {
///     panic!("expected a chunk");
/// };
/// assert!(header.is("greeting"));
/// reader.skip_chunk(&header)?;
/// assert_eq!(reader.next_chunk()?, ChunkScan::EndOfContainer);
/// # Ok::<(), gpa::Error>(())
/// ```
#[derive(Debug)]
pub struct ChunkReader<R> {
    reader: R,
    len: u64,
}

impl<R> ChunkReader<R>
where
    R: Read + Seek,
{
    /// Wraps a stream positioned at the start of a container
    pub fn new(mut reader: R) -> Result<Self, Error> {
        let start = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(start))?;
        Ok(ChunkReader { reader, len })
    }

    /// The current byte position in the stream
    pub fn position(&mut self) -> Result<u64, Error> {
        Ok(self.reader.stream_position()?)
    }

    /// Bytes left before the end of the stream
    pub fn remaining(&mut self) -> Result<u64, Error> {
        let position = self.position()?;
        Ok(self.len.saturating_sub(position))
    }

    /// Reads exactly one header.
    ///
    /// A short read is an [ErrorKind::Eof]. The header is returned whether or
    /// not its tag is terminated, so callers must check
    /// [ChunkHeader::is_valid] before trusting it.
    pub fn read_header(&mut self) -> Result<ChunkHeader, Error> {
        let mut data = [0u8; ChunkHeader::SIZE];
        self.reader.read_exact(&mut data)?;
        Ok(ChunkHeader::from_bytes(&data))
    }

    /// Advances to the next chunk header.
    ///
    /// Reaching the end of the stream exactly on a chunk boundary ends the
    /// container. So does an unterminated header that is the very last thing
    /// in the stream. A header cut short or an unterminated header followed
    /// by more data is an error.
    pub fn next_chunk(&mut self) -> Result<ChunkScan, Error> {
        let offset = self.position()?;
        if offset >= self.len {
            return Ok(ChunkScan::EndOfContainer);
        }

        let header = self.read_header()?;
        if !header.is_valid() {
            if self.position()? == self.len {
                tracing::debug!(offset, "unterminated trailing chunk header");
                return Ok(ChunkScan::EndOfContainer);
            }

            return Err(Error::new(ErrorKind::InvalidHeader { offset }));
        }

        tracing::trace!(offset, header = ?header, "read chunk header");
        Ok(ChunkScan::Chunk(header))
    }

    /// Seeks forward, failing if that would move past the end of the stream
    pub fn skip(&mut self, bytes: u64) -> Result<(), Error> {
        let position = self.position()?;
        let target = position
            .checked_add(bytes)
            .filter(|&x| x <= self.len)
            .ok_or_else(|| Error::new(ErrorKind::Eof))?;
        self.reader.seek(SeekFrom::Start(target))?;
        Ok(())
    }

    /// Skips the payload of a chunk whose header was just read
    pub fn skip_chunk(&mut self, header: &ChunkHeader) -> Result<(), Error> {
        self.skip(header.size())
    }

    /// Hands the payload of a chunk to the closure as a reader clamped to the
    /// payload size. Whatever the closure leaves unread is skipped.
    ///
    /// A payload that extends past the end of the stream fails before the
    /// closure is called.
    pub fn read_payload<F, T>(&mut self, header: &ChunkHeader, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Take<&mut R>) -> Result<T, Error>,
    {
        let start = self.position()?;
        let end = start
            .checked_add(header.size())
            .filter(|&x| x <= self.len)
            .ok_or_else(|| Error::new(ErrorKind::Eof))?;

        let mut payload = (&mut self.reader).take(header.size());
        let result = f(&mut payload)?;
        if payload.limit() > 0 {
            tracing::trace!(leftover = payload.limit(), "skipping unread chunk payload");
            self.reader.seek(SeekFrom::Start(end))?;
        }

        Ok(result)
    }

    /// Get a reference to the underlying stream
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes the chunk reader, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.reader
    }
}
