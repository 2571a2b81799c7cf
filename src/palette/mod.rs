//! Loading and saving palettes: named colors with an order and visibility.
//!
//! A palette file is a chunk container laid out as:
//!
//! ```text
//! "GPA version <build>"  format version (u32)
//! "handler_map"          value kinds used by the records below
//! "color_list"           one typed map record per entry ("name", "color")
//! "color_positions"      one u32 position per entry
//! ```
//!
//! Readers skip any other chunk. Entries are ordered by their stored
//! position, and an entry stored at [POSITION_HIDDEN] is hidden.

mod reader;
mod writer;

pub use self::reader::{PaletteReader, PaletteReaderBuilder};
pub use self::writer::{PaletteWriter, PaletteWriterBuilder};

use crate::{Color, Error, ErrorKind, TypedMap};
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Tag prefix of the version chunk. The build identifier of the writer
/// follows after a space.
pub const VERSION_TAG: &str = "GPA version";

/// Tag of the chunk that declares the value kinds used by records
pub const HANDLER_MAP_TAG: &str = "handler_map";

/// Tag of the chunk holding the entry records
pub const COLOR_LIST_TAG: &str = "color_list";

/// Tag of the chunk holding entry positions
pub const COLOR_POSITIONS_TAG: &str = "color_positions";

/// Reserved tag. Its chunks carry nothing this crate reads and are skipped.
pub const COLOR_ACTIONS_TAG: &str = "color_actions";

/// The position that marks an entry as hidden
pub const POSITION_HIDDEN: u32 = u32::MAX;

/// A palette file format version: major in the high 16 bits, minor in the low
///
/// ```
/// use gpa::FormatVersion;
/// assert_eq!(FormatVersion::CURRENT.raw(), 0x0001_0000);
/// assert_eq!(FormatVersion::CURRENT.to_string(), "1.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion(u32);

impl FormatVersion {
    /// The only version this crate reads and writes
    pub const CURRENT: FormatVersion = FormatVersion::new(1, 0);

    /// Creates a version from its parts
    pub const fn new(major: u16, minor: u16) -> FormatVersion {
        FormatVersion(((major as u32) << 16) | minor as u32)
    }

    /// Creates a version from its on disk representation
    pub const fn from_raw(raw: u32) -> FormatVersion {
        FormatVersion(raw)
    }

    /// The on disk representation
    pub const fn raw(&self) -> u32 {
        self.0
    }

    pub const fn major(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub const fn minor(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

/// A named color within a palette
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Display name, may be empty
    pub name: String,

    /// The color components
    pub color: Color,

    /// Where the entry sits in the palette. Loaded entries only carry a
    /// position when the file stored one for them.
    pub position: Option<u32>,

    /// Hidden entries are kept in the palette but not shown
    pub visible: bool,
}

impl Entry {
    /// Creates a visible entry without a position
    pub fn new<S: Into<String>>(name: S, color: Color) -> Entry {
        Entry {
            name: name.into(),
            color,
            position: None,
            visible: true,
        }
    }

    /// Sets the position of the entry
    pub fn with_position(mut self, position: u32) -> Entry {
        self.position = Some(position);
        self
    }

    /// Sets the visibility of the entry
    pub fn with_visible(mut self, visible: bool) -> Entry {
        self.visible = visible;
        self
    }

    /// The record stored for the entry in the color list chunk
    ///
    /// ```
    /// use gpa::{Color, Entry};
    /// let entry = Entry::new("Red", Color::new(1.0, 0.0, 0.0, 1.0));
    /// let map = entry.to_map();
    /// assert_eq!(map.get_string("name", ""), "Red");
    /// assert_eq!(Entry::from_map(&map), entry);
    /// ```
    pub fn to_map(&self) -> TypedMap {
        let mut map = TypedMap::new();
        map.set("name", self.name.as_str());
        map.set("color", self.color);
        map
    }

    /// Builds a visible, unpositioned entry from a record. Missing fields
    /// default to an empty name and a zeroed color.
    pub fn from_map(map: &TypedMap) -> Entry {
        let name = map.get_string("name", "");
        let color = map.get_color("color", Color::default());
        Entry::new(name, color)
    }
}

/// Computes the position stored for each entry, in collection order.
///
/// Hidden entries are stored at [POSITION_HIDDEN]. Visible entries keep the
/// position they carry, and visible entries without one are numbered by
/// their rank among the visible entries. A visible entry never receives
/// [POSITION_HIDDEN], so one carrying it is numbered by rank too.
///
/// ```
/// use gpa::{assign_positions, Color, Entry, POSITION_HIDDEN};
/// let entries = [
///     Entry::new("a", Color::default()),
///     Entry::new("b", Color::default()).with_visible(false),
///     Entry::new("c", Color::default()),
///     Entry::new("d", Color::default()).with_position(9),
/// ];
/// assert_eq!(assign_positions(&entries)?, vec![0, POSITION_HIDDEN, 1, 9]);
/// # Ok::<(), gpa::Error>(())
/// ```
pub fn assign_positions(entries: &[Entry]) -> Result<Vec<u32>, Error> {
    if entries.len() > POSITION_HIDDEN as usize {
        return Err(Error::new(ErrorKind::TooManyEntries {
            count: entries.len(),
        }));
    }

    let mut rank = 0u32;
    let positions = entries
        .iter()
        .map(|entry| {
            if !entry.visible {
                return POSITION_HIDDEN;
            }

            let position = entry
                .position
                .filter(|&x| x != POSITION_HIDDEN)
                .unwrap_or(rank);
            rank += 1;
            position
        })
        .collect();

    Ok(positions)
}

/// Loads the palette at the path, appending its entries to the collection
/// in display order.
///
/// On failure the collection is left untouched.
pub fn load<P, C>(path: P, collection: &mut C) -> Result<(), Error>
where
    P: AsRef<Path>,
    C: Extend<Entry>,
{
    let file = File::open(path)?;
    let mut reader = PaletteReader::new(BufReader::new(file));
    reader.read_into(collection)?;
    Ok(())
}

/// Saves the entries to a palette at the path.
///
/// An I/O error part way through leaves a truncated file behind.
pub fn save<P>(path: P, entries: &[Entry]) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut writer = PaletteWriter::new(BufWriter::new(file));
    writer.write_entries(entries)?;
    Ok(())
}
