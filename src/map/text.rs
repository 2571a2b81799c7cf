use super::TypedMap;
use crate::{types::text, Error, Value};
use std::io::Write;

/// Writes typed maps in a human readable markup form.
///
/// Every value becomes an element named after its key with a `type` attribute
/// naming its kind. Nested maps hold their values as child elements.
///
/// Instantiated via [TextWriterBuilder]
///
/// ```
/// use gpa::{TextWriterBuilder, TypedMap};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut map = TypedMap::new();
/// map.set("name", "Green & Blue");
/// map.set("count", 3i32);
///
/// let mut out: Vec<u8> = Vec::new();
/// let mut writer = TextWriterBuilder::new().from_writer(&mut out);
/// writer.write_map(&map)?;
/// assert_eq!(
///     std::str::from_utf8(&out)?,
///     "<name type=\"string\">Green &amp; Blue</name>\n<count type=\"int32\">3</count>\n"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TextWriter<W> {
    writer: W,
    depth: usize,
    indent_char: u8,
    indent_factor: u8,
    declaration: bool,
}

/// Construct a customized text writer
#[derive(Debug)]
pub struct TextWriterBuilder {
    indent_char: u8,
    indent_factor: u8,
    declaration: bool,
}

impl<W> TextWriter<W>
where
    W: Write,
{
    /// Get inner writer, keeping ownership
    pub fn inner(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes this writer, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes a complete document: the optional declaration and the map
    /// wrapped in a root element.
    ///
    /// ```
    /// use gpa::{TextWriterBuilder, TypedMap};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut map = TypedMap::new();
    /// map.set("visible", true);
    ///
    /// let mut out: Vec<u8> = Vec::new();
    /// let mut writer = TextWriterBuilder::new().declaration(false).from_writer(&mut out);
    /// writer.write_document(&map)?;
    /// assert_eq!(
    ///     std::str::from_utf8(&out)?,
    ///     "<root>\n  <visible type=\"bool\">true</visible>\n</root>\n"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_document(&mut self, map: &TypedMap) -> Result<(), Error> {
        self.write_root_start()?;
        self.write_map(map)?;
        self.write_root_end()
    }

    /// Writes the declaration (if enabled) and opens the root element
    pub fn write_root_start(&mut self) -> Result<(), Error> {
        if self.declaration {
            self.writer
                .write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        }

        self.write_indent()?;
        self.writer.write_all(b"<root>\n")?;
        self.depth += 1;
        Ok(())
    }

    /// Closes the root element
    pub fn write_root_end(&mut self) -> Result<(), Error> {
        self.depth = self.depth.saturating_sub(1);
        self.write_indent()?;
        self.writer.write_all(b"</root>\n")?;
        Ok(())
    }

    /// Writes every value of the map without a wrapping element
    pub fn write_map(&mut self, map: &TypedMap) -> Result<(), Error> {
        for (key, value) in map.iter() {
            self.write_field(key, value)?;
        }
        Ok(())
    }

    /// Writes a single value as an element named after the key
    pub fn write_field(&mut self, key: &str, value: &Value) -> Result<(), Error> {
        let key = text::escape(key);
        self.write_indent()?;
        write!(self.writer, "<{} type=\"{}\">", key, value.kind().name())?;
        match value {
            Value::Bool(x) => text::write_bool(&mut self.writer, *x)?,
            Value::Float(x) => text::write_f32(&mut self.writer, *x)?,
            Value::Int32(x) => text::write_i32(&mut self.writer, *x)?,
            Value::String(x) => text::write_string(&mut self.writer, x)?,
            Value::Color(x) => text::write_color(&mut self.writer, x)?,
            Value::Map(x) => {
                self.writer.write_all(b"\n")?;
                self.depth += 1;
                self.write_map(x)?;
                self.depth -= 1;
                self.write_indent()?;
            }
        }
        writeln!(self.writer, "</{}>", key)?;
        Ok(())
    }

    fn write_indent(&mut self) -> Result<(), Error> {
        for _ in 0..self.depth * usize::from(self.indent_factor) {
            self.writer.write_all(&[self.indent_char])?;
        }

        Ok(())
    }
}

impl TextWriterBuilder {
    /// Construct a new TextWriterBuilder with default values
    pub fn new() -> TextWriterBuilder {
        TextWriterBuilder::default()
    }

    /// The character to indent lines with.
    ///
    /// The default is a space.
    pub fn indent_char(&mut self, indent_char: u8) -> &mut TextWriterBuilder {
        self.indent_char = indent_char;
        self
    }

    /// The number of indents per increased depth
    ///
    /// The default is 2
    pub fn indent_factor(&mut self, indent_factor: u8) -> &mut TextWriterBuilder {
        self.indent_factor = indent_factor;
        self
    }

    /// Whether documents start with an xml declaration
    ///
    /// The default is true
    pub fn declaration(&mut self, declaration: bool) -> &mut TextWriterBuilder {
        self.declaration = declaration;
        self
    }

    /// Construct a text writer from a builder and a writer.
    pub fn from_writer<W>(&self, writer: W) -> TextWriter<W>
    where
        W: Write,
    {
        TextWriter {
            writer,
            depth: 0,
            indent_char: self.indent_char,
            indent_factor: self.indent_factor,
            declaration: self.declaration,
        }
    }
}

impl Default for TextWriterBuilder {
    fn default() -> Self {
        TextWriterBuilder {
            indent_char: b' ',
            indent_factor: 2,
            declaration: true,
        }
    }
}
