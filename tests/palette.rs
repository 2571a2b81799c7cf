use gpa::{
    ChunkWriter, Color, Entry, ErrorKind, HandlerMap, MapEncoder, PaletteReader,
    PaletteReaderBuilder, PaletteWriter, TypedMap, ValueKind, COLOR_ACTIONS_TAG, COLOR_LIST_TAG,
    COLOR_POSITIONS_TAG, HANDLER_MAP_TAG, POSITION_HIDDEN,
};
use quickcheck_macros::quickcheck;
use rstest::*;
use std::io::Cursor;

const VERSION: [u8; 4] = [0x00, 0x00, 0x01, 0x00];

fn save_to_vec(entries: &[Entry]) -> Vec<u8> {
    let mut writer = PaletteWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_entries(entries).unwrap();
    writer.into_inner().into_inner()
}

fn load_from_slice(data: &[u8]) -> Result<Vec<Entry>, gpa::Error> {
    let mut entries: Vec<Entry> = Vec::new();
    PaletteReader::new(Cursor::new(data)).read_into(&mut entries)?;
    Ok(entries)
}

fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|x| x.name.as_str()).collect()
}

/// Writes a palette by hand: version, a color/string handler map, one record
/// per entry and, optionally, the given positions.
fn handmade(entries: &[(&str, Color)], positions: Option<&[u32]>) -> Vec<u8> {
    let handlers = HandlerMap::from_kinds(&[ValueKind::Color, ValueKind::String]);
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
    writer
        .write_chunk(HANDLER_MAP_TAG, |out| handlers.write(out))
        .unwrap();
    writer
        .write_chunk(COLOR_LIST_TAG, |out| {
            for (name, color) in entries {
                let mut record = TypedMap::new();
                record.set("name", *name);
                record.set("color", *color);
                MapEncoder::new(&handlers).encode(out, &record)?;
            }
            Ok(())
        })
        .unwrap();

    if let Some(positions) = positions {
        let data: Vec<u8> = positions.iter().flat_map(|x| x.to_le_bytes()).collect();
        writer.write_chunk_bytes(COLOR_POSITIONS_TAG, &data).unwrap();
    }

    writer.into_inner().into_inner()
}

#[test]
fn test_entries_sorted_by_stored_position() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    let teal = Color::new(0.0, 1.0, 1.0, 1.0);
    let grey = Color::new(0.5, 0.5, 0.5, 1.0);
    let entries = vec![
        Entry::new("Red", red).with_position(2),
        Entry::new("Green & Blue", teal).with_position(0),
        Entry::new("Déjà vu", grey).with_position(1),
    ];

    let loaded = load_from_slice(&save_to_vec(&entries)).unwrap();
    assert_eq!(names(&loaded), vec!["Green & Blue", "Déjà vu", "Red"]);
    assert_eq!(loaded[0].color, teal);
    assert_eq!(loaded[1].color, grey);
    assert_eq!(loaded[2].color, red);
    assert!(loaded.iter().all(|x| x.visible));
    assert_eq!(loaded[2].position, Some(2));
}

#[test]
fn test_hidden_entries_sort_last() {
    let data = handmade(
        &[
            ("a", Color::default()),
            ("b", Color::default()),
            ("c", Color::default()),
        ],
        Some(&[0, POSITION_HIDDEN, 1]),
    );

    let loaded = load_from_slice(&data).unwrap();
    assert_eq!(names(&loaded), vec!["a", "c", "b"]);
    let visible: Vec<_> = loaded.iter().map(|x| x.visible).collect();
    assert_eq!(visible, vec![true, true, false]);
}

#[test]
fn test_visible_entry_at_sentinel_stays_visible_after_save() {
    let entries = vec![
        Entry::new("a", Color::default()).with_position(POSITION_HIDDEN),
        Entry::new("b", Color::default()),
    ];

    let loaded = load_from_slice(&save_to_vec(&entries)).unwrap();
    assert_eq!(names(&loaded), vec!["a", "b"]);
    assert!(loaded.iter().all(|x| x.visible));
    assert_eq!(loaded[0].position, Some(0));
}

#[test]
fn test_without_positions_everything_visible_in_file_order() {
    let data = handmade(
        &[("z", Color::default()), ("a", Color::default())],
        None,
    );

    let loaded = load_from_slice(&data).unwrap();
    assert_eq!(names(&loaded), vec!["z", "a"]);
    assert!(loaded.iter().all(|x| x.visible && x.position.is_none()));
}

#[test]
fn test_fewer_positions_than_entries() {
    let data = handmade(
        &[
            ("a", Color::default()),
            ("b", Color::default()),
            ("c", Color::default()),
        ],
        Some(&[5, 3]),
    );

    let loaded = load_from_slice(&data).unwrap();
    assert_eq!(names(&loaded), vec!["b", "a", "c"]);
    assert_eq!(loaded[2].position, None);
    assert!(loaded.iter().all(|x| x.visible));
}

#[test]
fn test_version_only_file_loads_nothing() {
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
    let data = writer.into_inner().into_inner();
    assert!(load_from_slice(&data).unwrap().is_empty());
}

#[rstest]
#[case(0x0001_0001)]
#[case(0x0002_0000)]
#[case(0x0000_0000)]
fn test_other_versions_rejected(#[case] version: u32) {
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer
        .write_chunk_bytes("GPA version 9", &version.to_le_bytes())
        .unwrap();
    let data = writer.into_inner().into_inner();

    let err = load_from_slice(&data).unwrap_err();
    match err.kind() {
        ErrorKind::UnsupportedVersion { found } => assert_eq!(*found, version),
        x => panic!("unexpected error: {:?}", x),
    }
}

#[rstest]
#[case("GPA versio")]
#[case("color_list")]
#[case("gpa version")]
fn test_first_chunk_not_version(#[case] tag: &str) {
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes(tag, &VERSION).unwrap();
    let data = writer.into_inner().into_inner();

    let err = load_from_slice(&data).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MissingVersion { .. }));
}

#[test]
fn test_version_prefix_match() {
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer
        .write_chunk_bytes("GPA version 0.5.2", &VERSION)
        .unwrap();
    let data = writer.into_inner().into_inner();

    let mut reader = PaletteReader::new(Cursor::new(data));
    assert!(reader.read_entries().unwrap().is_empty());
    assert_eq!(reader.build_identifier(), Some("0.5.2"));
}

#[test]
fn test_truncated_at_chunk_boundary_succeeds() {
    let full = handmade(&[("a", Color::default())], Some(&[0]));
    let positions_chunk = 24 + 4;
    let data = &full[..full.len() - positions_chunk];

    let loaded = load_from_slice(data).unwrap();
    assert_eq!(names(&loaded), vec!["a"]);
    assert!(loaded[0].visible);
}

#[test]
fn test_truncated_mid_chunk_fails_and_leaves_collection_alone() {
    let full = handmade(&[("a", Color::default()), ("b", Color::default())], None);
    let existing = Entry::new("existing", Color::new(0.1, 0.2, 0.3, 1.0));

    for cut in [1, 10, 30] {
        let data = &full[..full.len() - cut];
        let mut entries = vec![existing.clone()];
        let result = PaletteReader::new(Cursor::new(data)).read_into(&mut entries);
        assert!(matches!(result.unwrap_err().kind(), ErrorKind::Eof));
        assert_eq!(entries, vec![existing.clone()]);
    }
}

#[test]
fn test_unknown_chunks_skipped() {
    let handlers = HandlerMap::from_kinds(&[ValueKind::Color, ValueKind::String]);
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
    writer.write_chunk_bytes("mystery", b"?????").unwrap();
    writer
        .write_chunk(HANDLER_MAP_TAG, |out| handlers.write(out))
        .unwrap();
    writer.write_chunk_bytes(COLOR_ACTIONS_TAG, &[1, 2, 3]).unwrap();
    writer
        .write_chunk(COLOR_LIST_TAG, |out| {
            MapEncoder::new(&handlers).encode(out, &Entry::new("one", Color::default()).to_map())
        })
        .unwrap();
    writer.write_chunk_bytes("an_empty_one", &[]).unwrap();
    writer
        .write_chunk_bytes(COLOR_POSITIONS_TAG, &0u32.to_le_bytes())
        .unwrap();
    writer.write_chunk_bytes("trailing", &[0; 64]).unwrap();
    let data = writer.into_inner().into_inner();

    let loaded = load_from_slice(&data).unwrap();
    assert_eq!(loaded, vec![Entry::new("one", Color::default()).with_position(0)]);
}

#[test]
fn test_unknown_chunk_past_end_fails() {
    let mut data = handmade(&[], None);
    data.extend_from_slice(&gpa::ChunkHeader::new("mystery", 100).to_bytes());
    data.extend_from_slice(&[0; 99]);
    let err = load_from_slice(&data).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Eof));
}

#[test]
fn test_too_many_handlers() {
    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
    writer
        .write_chunk_bytes(HANDLER_MAP_TAG, &256u32.to_le_bytes())
        .unwrap();
    let data = writer.into_inner().into_inner();

    let err = load_from_slice(&data).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TooManyHandlers { count: 256 }));
}

#[test]
fn test_unknown_kind_only_fails_when_used() {
    use std::io::Write;

    let mut handlers = HandlerMap::new();
    handlers.push("fancy").unwrap();
    handlers.push("string").unwrap();

    let mut record = TypedMap::new();
    record.set("name", "plain");

    let build = |with_fancy: bool| {
        let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
        writer
            .write_chunk(HANDLER_MAP_TAG, |out| handlers.write(out))
            .unwrap();
        writer
            .write_chunk(COLOR_LIST_TAG, |out| {
                MapEncoder::new(&handlers).encode(out, &record)?;
                if with_fancy {
                    // one value with type code 0, key "x", and an opaque payload
                    out.write_all(&[1, 0, 0, 0, 0, 1, 0, 0, 0, b'x', 0xff])?;
                }
                Ok(())
            })
            .unwrap();
        writer.into_inner().into_inner()
    };

    let loaded = load_from_slice(&build(false)).unwrap();
    assert_eq!(names(&loaded), vec!["plain"]);
    assert_eq!(loaded[0].color, Color::default());

    let err = load_from_slice(&build(true)).unwrap_err();
    match err.kind() {
        ErrorKind::UnsupportedType { code, name } => {
            assert_eq!(*code, 0);
            assert_eq!(name, "fancy");
        }
        x => panic!("unexpected error: {:?}", x),
    }
}

#[test]
fn test_depth_limit_applies_to_records() {
    let handlers = HandlerMap::from_kinds(&[ValueKind::Map, ValueKind::String]);
    let mut inner = TypedMap::new();
    inner.set("name", "deep");
    let mut record = TypedMap::new();
    record.set("nested", inner);

    let mut writer = ChunkWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_chunk_bytes("GPA version", &VERSION).unwrap();
    writer
        .write_chunk(HANDLER_MAP_TAG, |out| handlers.write(out))
        .unwrap();
    writer
        .write_chunk(COLOR_LIST_TAG, |out| {
            MapEncoder::new(&handlers).encode(out, &record)
        })
        .unwrap();
    let data = writer.into_inner().into_inner();

    assert_eq!(load_from_slice(&data).unwrap().len(), 1);

    let err = PaletteReaderBuilder::new()
        .max_depth(0)
        .from_reader(Cursor::new(&data))
        .read_entries()
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DepthExceeded { depth: 0 }));
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.gpa");
    let entries = vec![
        Entry::new("Red", Color::new(1.0, 0.0, 0.0, 1.0)),
        Entry::new("Hidden", Color::new(0.0, 0.0, 0.0, 0.5)).with_visible(false),
        Entry::new("", Color::new(0.25, 0.5, 0.75, 1.0)),
    ];
    gpa::save(&path, &entries).unwrap();

    let mut loaded: Vec<Entry> = Vec::new();
    gpa::load(&path, &mut loaded).unwrap();
    assert_eq!(names(&loaded), vec!["Red", "", "Hidden"]);
    assert_eq!(loaded[2].position, Some(POSITION_HIDDEN));
    assert!(!loaded[2].visible);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut loaded: Vec<Entry> = Vec::new();
    let err = gpa::load(dir.path().join("nope.gpa"), &mut loaded).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[quickcheck]
fn test_save_load_equality(data: Vec<(String, (u8, u8, u8, u8), bool)>) -> bool {
    let entries: Vec<Entry> = data
        .into_iter()
        .map(|(name, (r, g, b, a), visible)| {
            let color = Color::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
                f32::from(a) / 255.0,
            );
            Entry::new(name, color).with_visible(visible)
        })
        .collect();

    let loaded = load_from_slice(&save_to_vec(&entries)).unwrap();

    let expected = entries
        .iter()
        .filter(|x| x.visible)
        .chain(entries.iter().filter(|x| !x.visible));

    loaded.len() == entries.len()
        && loaded.iter().zip(expected).all(|(actual, expected)| {
            actual.name == expected.name
                && actual.color == expected.color
                && actual.visible == expected.visible
        })
}
