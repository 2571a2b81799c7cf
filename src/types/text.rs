//! Textual rendering of the scalar value kinds.
//!
//! Output is locale independent. Nested maps are rendered by the
//! [TextWriter](crate::TextWriter) since they span multiple lines.

use crate::{Color, Error};
use std::{borrow::Cow, io::Write};

/// Escapes the characters that would otherwise be read as markup.
///
/// Only `&`, `<`, and `>` are replaced. Quotes are left alone as values are
/// never written inside of attributes.
pub(crate) fn escape(data: &str) -> Cow<'_, str> {
    let Some(first) = data.find(['&', '<', '>']) else {
        return Cow::Borrowed(data);
    };

    let mut result = String::with_capacity(data.len() + 16);
    result.push_str(&data[..first]);
    for ch in data[first..].chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }

    Cow::Owned(result)
}

pub(crate) fn write_bool<W: Write>(writer: &mut W, value: bool) -> Result<(), Error> {
    match value {
        true => writer.write_all(b"true")?,
        false => writer.write_all(b"false")?,
    };
    Ok(())
}

pub(crate) fn write_f32<W: Write>(writer: &mut W, value: f32) -> Result<(), Error> {
    write!(writer, "{}", value)?;
    Ok(())
}

#[cfg(feature = "faster_writer")]
pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), Error> {
    let mut buffer = itoa::Buffer::new();
    writer.write_all(buffer.format(value).as_bytes())?;
    Ok(())
}

#[cfg(not(feature = "faster_writer"))]
pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), Error> {
    write!(writer, "{}", value)?;
    Ok(())
}

pub(crate) fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), Error> {
    writer.write_all(escape(value).as_bytes())?;
    Ok(())
}

pub(crate) fn write_color<W: Write>(writer: &mut W, value: &Color) -> Result<(), Error> {
    let [c0, c1, c2, c3] = value.0;
    write!(writer, "{} {} {} {}", c0, c1, c2, c3)?;
    Ok(())
}
