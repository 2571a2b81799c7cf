use super::TypedMap;
use crate::{
    types::binary::{
        read_bool, read_color, read_f32, read_i32, read_string, read_u32, read_u8, write_bool,
        write_color, write_f32, write_i32, write_string, write_u32, write_u8,
    },
    Error, ErrorKind, Value, ValueKind,
};
use std::io::{Read, Write};

/// The most type codes a handler map can declare, as codes are a single byte
pub const MAX_HANDLERS: usize = 255;

/// Nesting limit for maps within maps when decoding
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Per file table that maps one byte type codes to value kinds.
///
/// A type code is the position of a kind's name in the table. Names that are
/// not in the registry are kept so that codes after them still line up, but
/// they resolve to no kind and any value using them can't be decoded.
///
/// ```
/// use gpa::{HandlerMap, ValueKind};
/// let mut handlers = HandlerMap::new();
/// handlers.push("color")?;
/// handlers.push("gradient")?;
/// handlers.push("string")?;
///
/// assert_eq!(handlers.kind(0)?, ValueKind::Color);
/// assert!(handlers.kind(1).is_err());
/// assert_eq!(handlers.code(ValueKind::String), Some(2));
/// # Ok::<(), gpa::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandlerMap {
    handlers: Vec<(String, Option<ValueKind>)>,
}

impl HandlerMap {
    /// Creates an empty handler map
    pub fn new() -> Self {
        HandlerMap::default()
    }

    /// Creates a handler map that assigns codes to the kinds in order
    pub fn from_kinds(kinds: &[ValueKind]) -> Self {
        let handlers = kinds
            .iter()
            .take(MAX_HANDLERS)
            .map(|kind| (String::from(kind.name()), Some(*kind)))
            .collect();
        HandlerMap { handlers }
    }

    /// Appends a handler by name and returns its type code
    pub fn push<S: Into<String>>(&mut self, name: S) -> Result<u8, Error> {
        let code = self.handlers.len();
        if code >= MAX_HANDLERS {
            return Err(Error::new(ErrorKind::TooManyHandlers {
                count: code as u32 + 1,
            }));
        }

        let name = name.into();
        let kind = ValueKind::from_name(&name);
        if kind.is_none() {
            tracing::debug!(code, name = %name, "unrecognized value kind in handler map");
        }

        self.handlers.push((name, kind));
        Ok(code as u8)
    }

    /// Number of declared handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are declared
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The declared handler names in code order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.iter().map(|(name, _)| name.as_str())
    }

    /// Resolves a type code to the value kind it stands for
    pub fn kind(&self, code: u8) -> Result<ValueKind, Error> {
        match self.handlers.get(usize::from(code)) {
            Some((_, Some(kind))) => Ok(*kind),
            Some((name, None)) => Err(Error::new(ErrorKind::UnsupportedType {
                code,
                name: name.clone(),
            })),
            None => Err(Error::new(ErrorKind::UnknownTypeCode { code })),
        }
    }

    /// Returns the type code assigned to the value kind
    pub fn code(&self, kind: ValueKind) -> Option<u8> {
        self.handlers
            .iter()
            .position(|(_, k)| *k == Some(kind))
            .map(|x| x as u8)
    }

    /// Reads a count followed by that many handler names
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let count = read_u32(reader)?;
        if count as usize > MAX_HANDLERS {
            return Err(Error::new(ErrorKind::TooManyHandlers { count }));
        }

        let mut result = HandlerMap::new();
        for _ in 0..count {
            let name = read_string(reader)?;
            result.push(name)?;
        }

        Ok(result)
    }

    /// Writes the count followed by the handler names
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        write_u32(writer, self.handlers.len() as u32)?;
        for (name, _) in self.handlers.iter() {
            write_string(writer, name)?;
        }
        Ok(())
    }
}

/// Decodes binary typed map records against a handler map.
///
/// A record is a little endian value count followed by, for every value, a
/// one byte type code, the key as a length prefixed string, and the value
/// payload. Nested maps are records themselves.
///
/// ```
/// use gpa::{HandlerMap, MapDecoder, ValueKind};
/// let handlers = HandlerMap::from_kinds(&[ValueKind::Int32]);
/// let data = [
///     0x01, 0x00, 0x00, 0x00, // one value
///     0x00,                   // type code
///     0x01, 0x00, 0x00, 0x00, b'n', // key
///     0x2a, 0x00, 0x00, 0x00, // value
/// ];
/// let map = MapDecoder::new(&handlers).decode(&mut &data[..])?;
/// assert_eq!(map.get_int32("n", 0), 42);
/// # Ok::<(), gpa::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MapDecoder<'a> {
    handlers: &'a HandlerMap,
    max_depth: usize,
}

impl<'a> MapDecoder<'a> {
    /// Creates a decoder that resolves type codes with the given handlers
    pub fn new(handlers: &'a HandlerMap) -> Self {
        MapDecoder {
            handlers,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest level of nested maps that will be decoded
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decodes exactly one record
    pub fn decode<R: Read>(&self, reader: &mut R) -> Result<TypedMap, Error> {
        self.decode_at(reader, 0)
    }

    fn decode_at<R: Read>(&self, reader: &mut R, depth: usize) -> Result<TypedMap, Error> {
        if depth > self.max_depth {
            return Err(Error::new(ErrorKind::DepthExceeded {
                depth: self.max_depth,
            }));
        }

        let count = read_u32(reader)?;
        let mut map = TypedMap::new();
        for _ in 0..count {
            let code = read_u8(reader)?;
            let key = read_string(reader)?;
            let value = match self.handlers.kind(code)? {
                ValueKind::Bool => Value::Bool(read_bool(reader)?),
                ValueKind::Float => Value::Float(read_f32(reader)?),
                ValueKind::Int32 => Value::Int32(read_i32(reader)?),
                ValueKind::String => Value::String(read_string(reader)?),
                ValueKind::Color => Value::Color(read_color(reader)?),
                ValueKind::Map => Value::Map(self.decode_at(reader, depth + 1)?),
            };
            map.set(key, value);
        }

        Ok(map)
    }
}

/// Encodes typed maps into binary records using the codes of a handler map
#[derive(Debug, Clone, Copy)]
pub struct MapEncoder<'a> {
    handlers: &'a HandlerMap,
}

impl<'a> MapEncoder<'a> {
    /// Creates an encoder that assigns type codes with the given handlers
    pub fn new(handlers: &'a HandlerMap) -> Self {
        MapEncoder { handlers }
    }

    /// Encodes one record. Fails if the map holds a kind without a code.
    pub fn encode<W: Write>(&self, writer: &mut W, map: &TypedMap) -> Result<(), Error> {
        let count = u32::try_from(map.len())
            .map_err(|_| Error::new(ErrorKind::TooManyEntries { count: map.len() }))?;
        write_u32(writer, count)?;

        for (key, value) in map.iter() {
            let kind = value.kind();
            let code = self
                .handlers
                .code(kind)
                .ok_or_else(|| Error::new(ErrorKind::UnmappedKind { kind }))?;

            write_u8(writer, code)?;
            write_string(writer, key)?;
            match value {
                Value::Bool(x) => write_bool(writer, *x)?,
                Value::Float(x) => write_f32(writer, *x)?,
                Value::Int32(x) => write_i32(writer, *x)?,
                Value::String(x) => write_string(writer, x)?,
                Value::Color(x) => write_color(writer, x)?,
                Value::Map(x) => self.encode(writer, x)?,
            }
        }

        Ok(())
    }
}
