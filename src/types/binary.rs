//! Binary framing of the scalar value kinds.
//!
//! All numbers are little endian on the wire. Nested maps are framed by the
//! map codec, as they need the per file handler map to decode.

use crate::{Color, Error, ErrorKind};
use std::io::{self, Read, Write};

/// Bytes occupied by the components of a [Color]
pub(crate) const COLOR_SIZE: u32 = 16;

#[inline]
fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], Error> {
    let mut data = [0u8; N];
    reader.read_exact(&mut data)?;
    Ok(data)
}

#[inline]
pub(crate) fn read_u8<R: Read>(reader: &mut R) -> Result<u8, Error> {
    read_array::<R, 1>(reader).map(|[x]| x)
}

#[inline]
pub(crate) fn read_bool<R: Read>(reader: &mut R) -> Result<bool, Error> {
    read_u8(reader).map(|x| x != 0)
}

#[inline]
pub(crate) fn read_u32<R: Read>(reader: &mut R) -> Result<u32, Error> {
    read_array(reader).map(u32::from_le_bytes)
}

#[inline]
pub(crate) fn read_i32<R: Read>(reader: &mut R) -> Result<i32, Error> {
    read_array(reader).map(i32::from_le_bytes)
}

#[inline]
pub(crate) fn read_f32<R: Read>(reader: &mut R) -> Result<f32, Error> {
    read_array(reader).map(f32::from_le_bytes)
}

/// Reads a length prefixed string.
///
/// The buffer is never sized from the length prefix up front.
pub(crate) fn read_string<R: Read>(reader: &mut R) -> Result<String, Error> {
    let len = read_u32(reader)?;
    let mut data = Vec::new();
    reader.by_ref().take(u64::from(len)).read_to_end(&mut data)?;
    if data.len() != len as usize {
        return Err(Error::new(ErrorKind::Eof));
    }

    match String::from_utf8(data) {
        Ok(s) => Ok(s),
        Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

/// Reads a color with a declared byte length.
///
/// Components missing from a short payload are zero. Bytes beyond the four
/// known components are skipped.
pub(crate) fn read_color<R: Read>(reader: &mut R) -> Result<Color, Error> {
    let declared = read_u32(reader)?;
    let stored = declared.min(COLOR_SIZE) as usize;

    let mut data = [0u8; COLOR_SIZE as usize];
    reader.read_exact(&mut data[..stored])?;
    skip(reader, u64::from(declared - stored as u32))?;

    let mut components = [0f32; 4];
    for (component, bytes) in components.iter_mut().zip(data.chunks_exact(4)) {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        *component = f32::from_le_bytes(raw);
    }

    // A partially stored component is still dropped
    let whole = stored / 4;
    for component in components.iter_mut().skip(whole) {
        *component = 0.0;
    }

    Ok(Color(components))
}

/// Discards the given number of bytes from a reader that may not be seekable
pub(crate) fn skip<R: Read>(reader: &mut R, bytes: u64) -> Result<(), Error> {
    if bytes == 0 {
        return Ok(());
    }

    let copied = io::copy(&mut reader.by_ref().take(bytes), &mut io::sink())?;
    if copied != bytes {
        return Err(Error::new(ErrorKind::Eof));
    }

    Ok(())
}

#[inline]
pub(crate) fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<(), Error> {
    writer.write_all(&[value])?;
    Ok(())
}

#[inline]
pub(crate) fn write_bool<W: Write>(writer: &mut W, value: bool) -> Result<(), Error> {
    write_u8(writer, u8::from(value))
}

#[inline]
pub(crate) fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<(), Error> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[inline]
pub(crate) fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), Error> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

#[inline]
pub(crate) fn write_f32<W: Write>(writer: &mut W, value: f32) -> Result<(), Error> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

pub(crate) fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), Error> {
    let len = u32::try_from(value.len()).map_err(|_| {
        Error::from(io::Error::new(
            io::ErrorKind::InvalidInput,
            "string longer than 4 GiB",
        ))
    })?;
    write_u32(writer, len)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

pub(crate) fn write_color<W: Write>(writer: &mut W, value: &Color) -> Result<(), Error> {
    write_u32(writer, COLOR_SIZE)?;
    for component in value.0.iter() {
        write_f32(writer, *component)?;
    }
    Ok(())
}
