//! Properties and property sets.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::{ModelError, ModelResult, PropertyType, Value};

/// A single typed key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    key: String,
    value: Value,
}

impl Property {
    /// Create a property whose declared type is the value's own kind.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a property with an explicit declared type.
    ///
    /// Fails if the value is not of the declared kind, or if a list value
    /// holds a nested list.
    pub fn typed(
        key: impl Into<String>,
        declared: PropertyType,
        value: impl Into<Value>,
    ) -> ModelResult<Self> {
        let key = key.into();
        let value = value.into();
        if value.property_type() != declared {
            return Err(ModelError::type_mismatch(key, declared, value.property_type()));
        }
        let property = Self { key, value };
        property.validate()?;
        Ok(property)
    }

    /// The property key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The property value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The declared type of this property.
    pub fn property_type(&self) -> PropertyType {
        self.value.property_type()
    }

    /// Split into key and value.
    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }

    /// Check the value is well formed: list elements must be scalars.
    pub fn validate(&self) -> ModelResult<()> {
        if let Value::List(items) = &self.value {
            if items.iter().any(|item| !item.is_scalar()) {
                return Err(ModelError::nested_list(&self.key));
            }
        }
        Ok(())
    }
}

/// An ordered set of properties with unique keys.
///
/// Insertion order is preserved; inserting an existing key replaces the value
/// in place. Matching ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: Vec<Property>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any existing value for the key.
    /// Returns the replaced value.
    pub fn insert(&mut self, property: Property) -> Option<Value> {
        match self.entries.iter_mut().find(|p| p.key == property.key) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, property.value)),
            None => {
                self.entries.push(property);
                None
            }
        }
    }

    /// Convenience form of `insert`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.insert(Property::new(key, value))
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Remove a property by key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|p| p.key == key)?;
        Some(self.entries.remove(pos).value)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|p| p.key == key)
    }

    /// Validate every property value.
    pub fn validate(&self) -> ModelResult<()> {
        self.entries.iter().try_for_each(Property::validate)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.key.as_str())
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for property in iter {
            set.insert(property);
        }
        set
    }
}

impl From<Vec<Property>> for PropertySet {
    fn from(properties: Vec<Property>) -> Self {
        properties.into_iter().collect()
    }
}

impl IntoIterator for PropertySet {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for property in &self.entries {
            map.serialize_entry(&property.key, &property.value)?;
        }
        map.end()
    }
}

/// Helper macro to build property sets.
#[macro_export]
macro_rules! props {
    () => {
        $crate::PropertySet::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut set = $crate::PropertySet::new();
            $(
                set.insert($crate::Property::new($key, $value));
            )+
            set
        }
    };
}
