use gpa::{Color, Entry, PaletteReader, PaletteWriter, TextWriterBuilder, TypedMap, Value};
use std::io::Cursor;

#[test]
fn test_palette_as_document() {
    let entries = vec![
        Entry::new("Green & Blue", Color::new(0.0, 1.0, 1.0, 1.0)).with_position(1),
        Entry::new("Déjà vu", Color::new(0.5, 0.5, 0.5, 1.0)).with_position(0),
    ];

    let mut writer = PaletteWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_entries(&entries).unwrap();
    let data = writer.into_inner().into_inner();
    let loaded = PaletteReader::new(Cursor::new(data)).read_entries().unwrap();

    let mut out: Vec<u8> = Vec::new();
    let mut writer = TextWriterBuilder::new().from_writer(&mut out);
    writer.write_root_start().unwrap();
    for entry in &loaded {
        writer
            .write_field("entry", &Value::Map(entry.to_map()))
            .unwrap();
    }
    writer.write_root_end().unwrap();

    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<root>\n",
        "  <entry type=\"dynv\">\n",
        "    <name type=\"string\">Déjà vu</name>\n",
        "    <color type=\"color\">0.5 0.5 0.5 1</color>\n",
        "  </entry>\n",
        "  <entry type=\"dynv\">\n",
        "    <name type=\"string\">Green &amp; Blue</name>\n",
        "    <color type=\"color\">0 1 1 1</color>\n",
        "  </entry>\n",
        "</root>\n",
    );
    assert_eq!(std::str::from_utf8(&out).unwrap(), expected);
}

#[test]
fn test_every_kind_as_text() {
    let mut nested = TypedMap::new();
    nested.set("flag", false);

    let mut map = TypedMap::new();
    map.set("visible", true);
    map.set("ratio", -1.5f32);
    map.set("count", -42i32);
    map.set("label", "a > b");
    map.set("color", Color::new(0.1, 0.2, 0.3, 0.4));
    map.set("extra", nested);

    let mut out: Vec<u8> = Vec::new();
    TextWriterBuilder::new()
        .declaration(false)
        .indent_factor(1)
        .from_writer(&mut out)
        .write_document(&map)
        .unwrap();

    let expected = concat!(
        "<root>\n",
        " <visible type=\"bool\">true</visible>\n",
        " <ratio type=\"float\">-1.5</ratio>\n",
        " <count type=\"int32\">-42</count>\n",
        " <label type=\"string\">a &gt; b</label>\n",
        " <color type=\"color\">0.1 0.2 0.3 0.4</color>\n",
        " <extra type=\"dynv\">\n",
        "  <flag type=\"bool\">false</flag>\n",
        " </extra>\n",
        "</root>\n",
    );
    assert_eq!(std::str::from_utf8(&out).unwrap(), expected);
}
