#![no_main]
use gpa::{Entry, PaletteReader, PaletteWriter};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut entries: Vec<Entry> = vec![Entry::new("sentinel", Default::default())];
    let result = PaletteReader::new(Cursor::new(data)).read_into(&mut entries);

    let Ok(count) = result else {
        assert_eq!(entries.len(), 1);
        return;
    };
    assert_eq!(entries.len(), count + 1);

    // Anything that loads must save and load again. Entries the file gave no
    // position are renumbered on save, so only the contents are compared.
    let loaded = entries.split_off(1);
    let mut writer = PaletteWriter::new(Cursor::new(Vec::<u8>::new()));
    writer.write_entries(&loaded).unwrap();
    let saved = writer.into_inner().into_inner();

    let reloaded = PaletteReader::new(Cursor::new(saved)).read_entries().unwrap();
    let mut expected: Vec<_> = loaded.iter().map(|x| (&x.name, x.visible)).collect();
    let mut actual: Vec<_> = reloaded.iter().map(|x| (&x.name, x.visible)).collect();
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
});
