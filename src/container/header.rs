use std::{fmt, io::Write};

/// Bytes reserved for the tag of a chunk, including its zero terminator
pub const TAG_SIZE: usize = 16;

/// The fixed size prefix of every chunk: a zero terminated tag followed by
/// the little endian length of the payload.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    tag: [u8; TAG_SIZE],
    size: u64,
}

impl ChunkHeader {
    /// Bytes occupied by a header on disk
    pub const SIZE: usize = 24;

    /// Creates a header for the tag and payload size.
    ///
    /// Tags longer than 15 bytes are truncated so the terminator always fits.
    ///
    /// ```
    /// use gpa::ChunkHeader;
    /// let header = ChunkHeader::new("GPA version 0.1.0-long-build", 4);
    /// assert_eq!(header.tag(), b"GPA version 0.1");
    /// assert!(header.is_valid());
    /// ```
    pub fn new(tag: &str, size: u64) -> ChunkHeader {
        let mut data = [0u8; TAG_SIZE];
        let len = tag.len().min(TAG_SIZE - 1);
        data[..len].copy_from_slice(&tag.as_bytes()[..len]);
        ChunkHeader { tag: data, size }
    }

    /// Parses a header from its on disk representation.
    ///
    /// No validation is performed, see [ChunkHeader::is_valid]
    pub fn from_bytes(data: &[u8; Self::SIZE]) -> ChunkHeader {
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&data[..TAG_SIZE]);
        let mut size = [0u8; 8];
        size.copy_from_slice(&data[TAG_SIZE..]);
        ChunkHeader {
            tag,
            size: u64::from_le_bytes(size),
        }
    }

    /// The on disk representation of the header
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..TAG_SIZE].copy_from_slice(&self.tag);
        out[TAG_SIZE..].copy_from_slice(&self.size.to_le_bytes());
        out
    }

    /// Writes the header
    pub fn write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// A header is only trustworthy when the last byte of its tag is the
    /// terminator.
    pub fn is_valid(&self) -> bool {
        self.tag[TAG_SIZE - 1] == 0
    }

    /// The length of the payload that follows the header
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The tag bytes up to the first terminator
    pub fn tag(&self) -> &[u8] {
        let end = self.tag.iter().position(|&x| x == 0).unwrap_or(TAG_SIZE);
        &self.tag[..end]
    }

    /// Returns true if the tag is exactly the given string
    pub fn is(&self, tag: &str) -> bool {
        self.tag() == tag.as_bytes()
    }

    /// Returns true if the tag begins with the given prefix
    ///
    /// ```
    /// use gpa::ChunkHeader;
    /// let header = ChunkHeader::new("GPA version 2.0", 4);
    /// assert!(header.starts_with("GPA version"));
    /// assert!(!header.is("GPA version"));
    /// ```
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.tag().starts_with(prefix.as_bytes())
    }
}

impl fmt::Debug for ChunkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkHeader")
            .field("tag", &String::from_utf8_lossy(self.tag()))
            .field("size", &self.size)
            .field("valid", &self.is_valid())
            .finish()
    }
}
