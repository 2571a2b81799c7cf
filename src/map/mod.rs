//! Schema-less typed key value maps and their binary and textual encodings.

mod binary;
mod text;

pub use self::binary::{HandlerMap, MapDecoder, MapEncoder, DEFAULT_MAX_DEPTH, MAX_HANDLERS};
pub use self::text::{TextWriter, TextWriterBuilder};

use crate::{Color, Value};
use std::collections::HashMap;

/// An ordered collection of keys and typed values.
///
/// Keys are unique: setting an existing key replaces its value in place,
/// keeping the original position. Lookups never fail, the typed getters fall
/// back to a caller supplied default when a key is absent or holds a value of
/// another kind.
///
/// ```
/// use gpa::{Color, TypedMap};
/// let mut map = TypedMap::new();
/// map.set("name", "Red");
/// map.set("color", Color::new(1.0, 0.0, 0.0, 1.0));
///
/// assert_eq!(map.get_string("name", ""), "Red");
/// assert_eq!(map.get_int32("name", 7), 7);
/// assert_eq!(map.get_color("missing", Color::default()), Color::default());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(String, Value)>", into = "Vec<(String, Value)>")
)]
pub struct TypedMap {
    values: Vec<(String, Value)>,

    // position of each key within `values`
    index: HashMap<String, usize>,
}

impl TypedMap {
    /// Creates an empty map
    pub fn new() -> Self {
        TypedMap::default()
    }

    /// Number of keys in the map
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the map holds no keys
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate through the keys and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the value stored under the key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&idx| &self.values[idx].1)
    }

    /// Returns true if the map holds the key
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Stores a value under the key, overwriting any previous value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&idx) => self.values[idx].1 = value,
            None => {
                self.index.insert(key.clone(), self.values.len());
                self.values.push((key, value));
            }
        }
    }

    /// Removes the key, returning its value. Later keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.index.remove(key)?;
        let (_, value) = self.values.remove(idx);
        for (k, _) in &self.values[idx..] {
            if let Some(position) = self.index.get_mut(k) {
                *position -= 1;
            }
        }
        Some(value)
    }

    /// Returns the boolean under the key or the default
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(x)) => *x,
            _ => default,
        }
    }

    /// Returns the float under the key or the default
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.get(key) {
            Some(Value::Float(x)) => *x,
            _ => default,
        }
    }

    /// Returns the integer under the key or the default
    pub fn get_int32(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(Value::Int32(x)) => *x,
            _ => default,
        }
    }

    /// Returns the string under the key or the default
    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(Value::String(x)) => x.as_str(),
            _ => default,
        }
    }

    /// Returns the color under the key or the default
    pub fn get_color(&self, key: &str, default: Color) -> Color {
        match self.get(key) {
            Some(Value::Color(x)) => *x,
            _ => default,
        }
    }

    /// Returns the nested map under the key
    pub fn get_map(&self, key: &str) -> Option<&TypedMap> {
        match self.get(key) {
            Some(Value::Map(x)) => Some(x),
            _ => None,
        }
    }
}

impl From<Vec<(String, Value)>> for TypedMap {
    fn from(values: Vec<(String, Value)>) -> Self {
        values.into_iter().collect()
    }
}

impl From<TypedMap> for Vec<(String, Value)> {
    fn from(map: TypedMap) -> Self {
        map.values
    }
}

impl<K, V> FromIterator<(K, V)> for TypedMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TypedMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
