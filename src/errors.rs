use crate::ValueKind;
use std::fmt;

/// An error that can occur when reading or writing palette data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<u64> {
        self.0.offset()
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The underlying stream could not be opened, read, written, or seeked
    Io(std::io::Error),

    /// Unexpected end of input. The data was truncated inside a chunk.
    Eof,

    /// A chunk header whose tag is not zero terminated
    InvalidHeader { offset: u64 },

    /// The first chunk is not a version chunk
    MissingVersion { offset: u64 },

    /// The version chunk is too small to hold a version number
    InvalidVersionChunk { size: u64 },

    /// The file was written with an incompatible format version
    UnsupportedVersion { found: u32 },

    /// The handler map declares more type codes than fit in a byte
    TooManyHandlers { count: u32 },

    /// A record references a type code that the handler map does not declare
    UnknownTypeCode { code: u8 },

    /// A record references a type code that maps to a value kind this crate
    /// does not understand, so the size of the value can't be determined
    UnsupportedType { code: u8, name: String },

    /// A value of this kind was written without a type code assigned to it
    UnmappedKind { kind: ValueKind },

    /// Nested maps exceeded the configured depth
    DepthExceeded { depth: usize },

    /// More entries than can be addressed by a 32 bit position
    TooManyEntries { count: usize },
}

impl ErrorKind {
    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<u64> {
        match *self {
            ErrorKind::InvalidHeader { offset } => Some(offset),
            ErrorKind::MissingVersion { offset } => Some(offset),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
            ErrorKind::Eof => write!(f, "unexpected end of file"),
            ErrorKind::InvalidHeader { offset } => write!(
                f,
                "chunk header tag is not zero terminated (offset: {})",
                offset
            ),
            ErrorKind::MissingVersion { offset } => write!(
                f,
                "expected the first chunk to be a version chunk (offset: {})",
                offset
            ),
            ErrorKind::InvalidVersionChunk { size } => write!(
                f,
                "version chunk payload of {} bytes is too small to hold a version",
                size
            ),
            ErrorKind::UnsupportedVersion { found } => write!(
                f,
                "unsupported format version {}.{}",
                found >> 16,
                found & 0xffff
            ),
            ErrorKind::TooManyHandlers { count } => {
                write!(f, "handler map declares {} handlers (max: 255)", count)
            }
            ErrorKind::UnknownTypeCode { code } => {
                write!(f, "type code {} is not declared in the handler map", code)
            }
            ErrorKind::UnsupportedType { code, ref name } => write!(
                f,
                "type code {} refers to unsupported value kind: {:?}",
                code, name
            ),
            ErrorKind::UnmappedKind { kind } => {
                write!(f, "no type code assigned to {} values", kind.name())
            }
            ErrorKind::DepthExceeded { depth } => {
                write!(f, "nested maps exceeded max depth of {}", depth)
            }
            ErrorKind::TooManyEntries { count } => {
                write!(f, "{} entries can't be addressed by 32 bit positions", count)
            }
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::new(ErrorKind::Eof)
        } else {
            Error::new(ErrorKind::Io(error))
        }
    }
}
