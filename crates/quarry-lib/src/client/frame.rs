use indexmap::IndexMap;
use quarry_core::{DataType, Schema, Value};

use super::TableSource;
use crate::config::{Config, IntegerInference};
use crate::literal::infer_dtype;
use crate::{Error, Result, Site};

/// In-memory columnar table: column name to values, in column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    columns: IndexMap<String, Vec<Value>>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column.
    pub fn with_column<V: Into<Value>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.columns
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Rows in the longest column.
    pub fn num_rows(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Type of one column: the common supertype of its values.
    ///
    /// Stored integers are 64-bit, so integral columns infer as `int64`.
    fn infer_column(name: &str, values: &[Value], config: &Config) -> Result<DataType> {
        let mut acc = DataType::Null;
        for value in values {
            let ty = infer_dtype(value, config)?;
            acc = acc
                .common_supertype(&ty)
                .ok_or_else(|| Error::ElementTypeConflict {
                    site: Site {
                        op: "Frame".to_owned(),
                        arg: name.to_owned(),
                    },
                    left: acc.clone(),
                    right: ty,
                })?;
        }
        Ok(acc)
    }
}

impl TableSource for Frame {
    fn schema(&self) -> Result<Schema> {
        let config = Config::default().with_integer_inference(IntegerInference::Int64);
        let mut schema = Schema::new();
        for (name, values) in &self.columns {
            schema.insert(name.as_str(), Self::infer_column(name, values, &config)?);
        }
        Ok(schema)
    }
}
