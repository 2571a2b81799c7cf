//! The fixed set of value kinds that typed maps can hold.
//!
//! Each kind has a stable name that is written into a file's handler map. The
//! numeric code for a kind is not fixed: it is assigned per file by the order
//! in which names appear in the handler map (see
//! [HandlerMap](crate::HandlerMap)).

pub(crate) mod binary;
pub(crate) mod text;

use crate::TypedMap;

/// Shape of a value stored in a typed map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    /// A boolean stored as a single byte
    Bool,

    /// A 32 bit float
    Float,

    /// A 32 bit signed integer
    Int32,

    /// A UTF-8 string
    String,

    /// Four 32 bit float components
    Color,

    /// A nested typed map
    Map,
}

/// Every value kind and the name it is known by on disk, in registry order.
///
/// ```
/// use gpa::{ValueKind, KNOWN_KINDS};
/// assert_eq!(KNOWN_KINDS[4], ("color", ValueKind::Color));
/// ```
pub const KNOWN_KINDS: [(&str, ValueKind); 6] = [
    ("bool", ValueKind::Bool),
    ("float", ValueKind::Float),
    ("int32", ValueKind::Int32),
    ("string", ValueKind::String),
    ("color", ValueKind::Color),
    ("dynv", ValueKind::Map),
];

impl ValueKind {
    /// Returns the value kind registered under the given name.
    ///
    /// An empty or unrecognized name returns `None`. This is not an error:
    /// files written by newer versions may declare kinds that are unknown
    /// here.
    ///
    /// ```
    /// use gpa::ValueKind;
    /// assert_eq!(ValueKind::from_name("int32"), Some(ValueKind::Int32));
    /// assert_eq!(ValueKind::from_name("matrix"), None);
    /// assert_eq!(ValueKind::from_name(""), None);
    /// ```
    pub fn from_name(name: &str) -> Option<ValueKind> {
        if name.is_empty() {
            return None;
        }

        KNOWN_KINDS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, kind)| *kind)
    }

    /// The name this kind is registered under
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Float => "float",
            ValueKind::Int32 => "int32",
            ValueKind::String => "string",
            ValueKind::Color => "color",
            ValueKind::Map => "dynv",
        }
    }
}

/// A color made of four floating point components.
///
/// The meaning of the components is up to the color space of the caller (the
/// palette stores RGB plus alpha).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Creates a color from its four components
    pub const fn new(c0: f32, c1: f32, c2: f32, c3: f32) -> Color {
        Color([c0, c1, c2, c3])
    }

    /// Returns the components of the color
    pub fn components(&self) -> [f32; 4] {
        self.0
    }
}

impl From<[f32; 4]> for Color {
    fn from(components: [f32; 4]) -> Self {
        Color(components)
    }
}

/// A value held by a typed map
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Float(f32),
    Int32(i32),
    String(String),
    Color(Color),
    Map(TypedMap),
}

impl Value {
    /// The kind of this value
    ///
    /// ```
    /// use gpa::{Value, ValueKind};
    /// assert_eq!(Value::from("red").kind(), ValueKind::String);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Float(_) => ValueKind::Float,
            Value::Int32(_) => ValueKind::Int32,
            Value::String(_) => ValueKind::String,
            Value::Color(_) => ValueKind::Color,
            Value::Map(_) => ValueKind::Map,
        }
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Bool(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int32(x)
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::String(x)
    }
}

impl From<&'_ str> for Value {
    fn from(x: &str) -> Self {
        Value::String(String::from(x))
    }
}

impl From<Color> for Value {
    fn from(x: Color) -> Self {
        Value::Color(x)
    }
}

impl From<TypedMap> for Value {
    fn from(x: TypedMap) -> Self {
        Value::Map(x)
    }
}
