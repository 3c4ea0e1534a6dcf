//! Ordered column → type mapping for table expressions.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::DataType;

/// Table schema. Column order is significant, including for equality.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(IndexMap<String, DataType>);

impl Schema {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Insert or replace a column. Replacing keeps the column's position.
    pub fn insert(&mut self, name: impl Into<String>, ty: DataType) -> Option<DataType> {
        self.0.insert(name.into(), ty)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.0.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Apply `overrides` on top of this schema.
    ///
    /// Overridden columns keep their position; new columns are appended.
    pub fn merged(mut self, overrides: &Schema) -> Self {
        for (name, ty) in overrides.iter() {
            self.insert(name, ty.clone());
        }
        self
    }

    /// The equivalent struct type, fields in column order.
    pub fn to_struct(&self) -> DataType {
        DataType::Struct(
            self.0
                .iter()
                .map(|(name, ty)| (name.clone(), ty.clone()))
                .collect(),
        )
    }

    /// Schema from a struct type. `None` for any other type.
    pub fn from_struct(ty: &DataType) -> Option<Self> {
        match ty {
            DataType::Struct(fields) => Some(fields.iter().cloned().collect()),
            _ => None,
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Schema {}

impl<N: Into<String>> FromIterator<(N, DataType)> for Schema {
    fn from_iter<T: IntoIterator<Item = (N, DataType)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, ty)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {ty}")?;
        }
        f.write_str("}")
    }
}
