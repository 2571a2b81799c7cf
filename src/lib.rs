/*!

A reader and writer for GPA palette files: a list of named colors along with
their order and visibility, stored in an extensible chunk container.

## Features

- ✔ Forward compatible: chunks and value kinds that aren't recognized are skipped
- ✔ Strict where it matters: a missing or unsupported format version is rejected
- ✔ Safe: truncated and malformed files fail with a descriptive error
- ✔ All or nothing: a failed load never touches the caller's collection

## Quick Start

```rust
use gpa::{Color, Entry, PaletteReader, PaletteWriter};
use std::io::Cursor;

let entries = vec![
    Entry::new("Red", Color::new(1.0, 0.0, 0.0, 1.0)).with_position(2),
    Entry::new("Green & Blue", Color::new(0.0, 1.0, 1.0, 1.0)).with_position(0),
    Entry::new("Déjà vu", Color::new(0.5, 0.5, 0.5, 1.0)).with_position(1),
];

let mut writer = PaletteWriter::new(Cursor::new(Vec::<u8>::new()));
writer.write_entries(&entries)?;
let data = writer.into_inner().into_inner();

let mut loaded: Vec<Entry> = Vec::new();
PaletteReader::new(Cursor::new(data)).read_into(&mut loaded)?;

let names: Vec<_> = loaded.iter().map(|x| x.name.as_str()).collect();
assert_eq!(names, vec!["Green & Blue", "Déjà vu", "Red"]);
# Ok::<(), gpa::Error>(())
```

Files on disk can be read and written with [load] and [save].

## One Level Lower

Palettes are made of two layers that are usable on their own. The
[ChunkReader] and [ChunkWriter] frame a stream into tagged chunks, and
[TypedMap] records hold keyed values of the kinds listed in [KNOWN_KINDS],
encoded with a per file [HandlerMap].

```rust
use gpa::{HandlerMap, MapDecoder, MapEncoder, TypedMap, ValueKind};

let handlers = HandlerMap::from_kinds(&[ValueKind::Int32, ValueKind::String]);
let mut record = TypedMap::new();
record.set("name", "teal");
record.set("uses", 3i32);

let mut data: Vec<u8> = Vec::new();
MapEncoder::new(&handlers).encode(&mut data, &record)?;
let decoded = MapDecoder::new(&handlers).decode(&mut data.as_slice())?;
assert_eq!(decoded, record);
# Ok::<(), gpa::Error>(())
```

Records can also be written in a human readable form with a [TextWriter].

*/

mod container;
mod errors;
mod map;
mod palette;
mod types;

pub use self::container::*;
pub use self::errors::*;
pub use self::map::*;
pub use self::palette::*;
pub use self::types::{Color, Value, ValueKind, KNOWN_KINDS};
