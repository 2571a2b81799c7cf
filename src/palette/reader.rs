use super::{
    Entry, FormatVersion, COLOR_ACTIONS_TAG, COLOR_LIST_TAG, COLOR_POSITIONS_TAG,
    HANDLER_MAP_TAG, POSITION_HIDDEN, VERSION_TAG,
};
use crate::{
    container::{ChunkReader, ChunkScan},
    map::{HandlerMap, MapDecoder, DEFAULT_MAX_DEPTH},
    types::binary::read_u32,
    Error, ErrorKind,
};
use std::io::{Read, Seek};

/// Construct a customized palette reader
///
/// ```
/// use gpa::PaletteReaderBuilder;
/// use std::io::Cursor;
/// let reader = PaletteReaderBuilder::new()
///     .max_depth(4)
///     .from_reader(Cursor::new(Vec::<u8>::new()));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteReaderBuilder {
    max_depth: usize,
}

impl PaletteReaderBuilder {
    /// Construct a new PaletteReaderBuilder with default values
    pub fn new() -> PaletteReaderBuilder {
        PaletteReaderBuilder::default()
    }

    /// The deepest level of nested maps a record may contain.
    ///
    /// The default is 16
    pub fn max_depth(&mut self, max_depth: usize) -> &mut PaletteReaderBuilder {
        self.max_depth = max_depth;
        self
    }

    /// Construct a palette reader from a builder and a stream
    pub fn from_reader<R>(&self, reader: R) -> PaletteReader<R>
    where
        R: Read + Seek,
    {
        PaletteReader {
            reader,
            max_depth: self.max_depth,
            build_identifier: None,
        }
    }
}

impl Default for PaletteReaderBuilder {
    fn default() -> Self {
        PaletteReaderBuilder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Reads the entries of a palette file from a seekable stream
#[derive(Debug)]
pub struct PaletteReader<R> {
    reader: R,
    max_depth: usize,
    build_identifier: Option<String>,
}

impl<R> PaletteReader<R>
where
    R: Read + Seek,
{
    /// Convenience method for constructing the default palette reader
    pub fn new(reader: R) -> Self {
        PaletteReaderBuilder::new().from_reader(reader)
    }

    /// The build identifier of the program that wrote the last file read
    /// successfully
    pub fn build_identifier(&self) -> Option<&str> {
        self.build_identifier.as_deref()
    }

    /// Consumes the palette reader, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads every entry and appends them to the collection in display
    /// order. Returns the number of entries appended.
    ///
    /// Nothing is appended unless the whole file is read successfully.
    pub fn read_into<C>(&mut self, collection: &mut C) -> Result<usize, Error>
    where
        C: Extend<Entry>,
    {
        let entries = self.read_entries()?;
        let count = entries.len();
        collection.extend(entries);
        Ok(count)
    }

    /// Reads every entry, sorted into display order with visibility set
    pub fn read_entries(&mut self) -> Result<Vec<Entry>, Error> {
        self.build_identifier = None;
        let mut chunks = ChunkReader::new(&mut self.reader)?;

        let offset = chunks.position()?;
        let header = chunks.read_header()?;
        if !header.is_valid() || !header.starts_with(VERSION_TAG) {
            return Err(Error::new(ErrorKind::MissingVersion { offset }));
        }

        if header.size() < 4 {
            return Err(Error::new(ErrorKind::InvalidVersionChunk {
                size: header.size(),
            }));
        }

        let version = chunks.read_payload(&header, |payload| read_u32(payload))?;
        if version != FormatVersion::CURRENT.raw() {
            return Err(Error::new(ErrorKind::UnsupportedVersion { found: version }));
        }

        let build = String::from_utf8_lossy(&header.tag()[VERSION_TAG.len()..]);
        let build = String::from(build.trim_start());

        let mut handlers = HandlerMap::new();
        let mut entries = Vec::new();
        let mut positions = None;

        while let ChunkScan::Chunk(header) = chunks.next_chunk()? {
            if header.is(HANDLER_MAP_TAG) {
                let declared = chunks.read_payload(&header, |payload| HandlerMap::read(payload))?;
                for name in declared.names() {
                    handlers.push(name)?;
                }
            } else if header.is(COLOR_LIST_TAG) {
                let decoder = MapDecoder::new(&handlers).max_depth(self.max_depth);
                chunks.read_payload(&header, |payload| {
                    while payload.limit() > 0 {
                        let record = decoder.decode(payload)?;
                        entries.push(Entry::from_map(&record));
                    }
                    Ok(())
                })?;
            } else if header.is(COLOR_POSITIONS_TAG) {
                let data = chunks.read_payload(&header, |payload| {
                    let mut data = Vec::new();
                    payload.read_to_end(&mut data)?;
                    Ok(data)
                })?;

                let stored: Vec<u32> = data
                    .chunks_exact(4)
                    .map(|x| u32::from_le_bytes([x[0], x[1], x[2], x[3]]))
                    .collect();
                positions = Some(stored);
            } else {
                if !header.is(COLOR_ACTIONS_TAG) {
                    tracing::debug!(
                        tag = %String::from_utf8_lossy(header.tag()),
                        size = header.size(),
                        "skipping unrecognized chunk"
                    );
                }
                chunks.skip_chunk(&header)?;
            }
        }

        match positions {
            Some(positions) => {
                if positions.len() != entries.len() {
                    tracing::debug!(
                        positions = positions.len(),
                        entries = entries.len(),
                        "position count does not match entry count"
                    );
                }

                for (entry, position) in entries.iter_mut().zip(positions) {
                    entry.position = Some(position);
                }

                entries.sort_by_key(|entry| entry.position.unwrap_or(POSITION_HIDDEN));
                for entry in entries.iter_mut() {
                    entry.visible = entry.position != Some(POSITION_HIDDEN);
                }
            }
            None => {
                for entry in entries.iter_mut() {
                    entry.visible = true;
                }
            }
        }

        tracing::debug!(entries = entries.len(), build = %build, "read palette");
        self.build_identifier = Some(build);
        Ok(entries)
    }
}
