use super::{
    assign_positions, Entry, FormatVersion, COLOR_LIST_TAG, COLOR_POSITIONS_TAG,
    HANDLER_MAP_TAG, VERSION_TAG,
};
use crate::{
    container::ChunkWriter,
    map::{HandlerMap, MapEncoder},
    Error, ValueKind,
};
use std::io::{Seek, Write};

/// Construct a customized palette writer
///
/// ```
/// use gpa::{Color, Entry, PaletteReader, PaletteWriterBuilder};
/// use std::io::Cursor;
///
/// let mut writer = PaletteWriterBuilder::new()
///     .build_identifier("2.0.0")
///     .from_writer(Cursor::new(Vec::<u8>::new()));
/// writer.write_entries(&[Entry::new("Red", Color::new(1.0, 0.0, 0.0, 1.0))])?;
///
/// let mut reader = PaletteReader::new(Cursor::new(writer.into_inner().into_inner()));
/// let entries = reader.read_entries()?;
/// assert_eq!(reader.build_identifier(), Some("2.0.0"));
/// assert_eq!(entries[0].name, "Red");
/// # Ok::<(), gpa::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PaletteWriterBuilder {
    build_identifier: String,
}

impl PaletteWriterBuilder {
    /// Construct a new PaletteWriterBuilder with default values
    pub fn new() -> PaletteWriterBuilder {
        PaletteWriterBuilder::default()
    }

    /// The identifier appended to the version chunk tag. It is cut short so
    /// that the tag fits within a chunk header.
    ///
    /// The default is the version of this crate
    pub fn build_identifier(&mut self, build_identifier: &str) -> &mut PaletteWriterBuilder {
        self.build_identifier = String::from(build_identifier);
        self
    }

    /// Construct a palette writer from a builder and a stream
    pub fn from_writer<W>(&self, writer: W) -> PaletteWriter<W>
    where
        W: Write + Seek,
    {
        PaletteWriter {
            writer,
            build_identifier: self.build_identifier.clone(),
        }
    }
}

impl Default for PaletteWriterBuilder {
    fn default() -> Self {
        PaletteWriterBuilder {
            build_identifier: String::from(env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Writes palette files to a seekable stream
#[derive(Debug)]
pub struct PaletteWriter<W> {
    writer: W,
    build_identifier: String,
}

impl<W> PaletteWriter<W>
where
    W: Write + Seek,
{
    /// Convenience method for constructing the default palette writer
    pub fn new(writer: W) -> Self {
        PaletteWriterBuilder::new().from_writer(writer)
    }

    /// Consumes the palette writer, returning the underlying stream
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes a complete palette file holding the entries, in order, then
    /// flushes the stream.
    pub fn write_entries(&mut self, entries: &[Entry]) -> Result<(), Error> {
        let positions = assign_positions(entries)?;

        let tag = if self.build_identifier.is_empty() {
            String::from(VERSION_TAG)
        } else {
            format!("{} {}", VERSION_TAG, self.build_identifier)
        };

        let handlers = HandlerMap::from_kinds(&[ValueKind::Color, ValueKind::String]);
        let encoder = MapEncoder::new(&handlers);

        let mut chunks = ChunkWriter::new(&mut self.writer);
        chunks.write_chunk_bytes(&tag, &FormatVersion::CURRENT.raw().to_le_bytes())?;
        chunks.write_chunk(HANDLER_MAP_TAG, |out| handlers.write(out))?;
        chunks.write_chunk(COLOR_LIST_TAG, |out| {
            for entry in entries {
                encoder.encode(out, &entry.to_map())?;
            }
            Ok(())
        })?;

        let mut data = Vec::with_capacity(positions.len() * 4);
        for position in &positions {
            data.extend_from_slice(&position.to_le_bytes());
        }
        chunks.write_chunk_bytes(COLOR_POSITIONS_TAG, &data)?;
        chunks.get_mut().flush()?;

        tracing::debug!(entries = entries.len(), "wrote palette");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, ChunkHeader};
    use std::io::Cursor;

    fn written(entries: &[Entry], build: &str) -> Vec<u8> {
        let mut writer = PaletteWriterBuilder::new()
            .build_identifier(build)
            .from_writer(Cursor::new(Vec::<u8>::new()));
        writer.write_entries(entries).unwrap();
        writer.into_inner().into_inner()
    }

    #[test]
    fn test_empty_palette_layout() {
        let data = written(&[], "");

        let mut header = [0u8; ChunkHeader::SIZE];
        header.copy_from_slice(&data[..ChunkHeader::SIZE]);
        let version = ChunkHeader::from_bytes(&header);
        assert_eq!(version.tag(), b"GPA version");
        assert_eq!(version.size(), 4);
        assert_eq!(&data[24..28], &[0, 0, 1, 0]);

        header.copy_from_slice(&data[28..28 + ChunkHeader::SIZE]);
        let handlers = ChunkHeader::from_bytes(&header);
        assert!(handlers.is(HANDLER_MAP_TAG));

        // count, then "color" and "string"
        let expected_size = 4 + (4 + 5) + (4 + 6);
        assert_eq!(handlers.size(), expected_size);

        let tail = &data[data.len() - 2 * ChunkHeader::SIZE..];
        header.copy_from_slice(&tail[..ChunkHeader::SIZE]);
        assert!(ChunkHeader::from_bytes(&header).is(COLOR_LIST_TAG));
        assert_eq!(ChunkHeader::from_bytes(&header).size(), 0);
        header.copy_from_slice(&tail[ChunkHeader::SIZE..]);
        assert!(ChunkHeader::from_bytes(&header).is(COLOR_POSITIONS_TAG));
        assert_eq!(ChunkHeader::from_bytes(&header).size(), 0);
    }

    #[test]
    fn test_build_identifier_is_cut_short() {
        let data = written(&[], "1.0.0-some-very-long-build");
        let mut header = [0u8; ChunkHeader::SIZE];
        header.copy_from_slice(&data[..ChunkHeader::SIZE]);
        assert_eq!(ChunkHeader::from_bytes(&header).tag(), b"GPA version 1.0");
    }

    #[test]
    fn test_positions_chunk_contents() {
        let entries = [
            Entry::new("a", Color::default()),
            Entry::new("b", Color::default()).with_visible(false),
            Entry::new("c", Color::default()),
        ];
        let data = written(&entries, "x");
        let tail = &data[data.len() - 12..];
        assert_eq!(tail, &[0, 0, 0, 0, 255, 255, 255, 255, 1, 0, 0, 0]);
    }
}
