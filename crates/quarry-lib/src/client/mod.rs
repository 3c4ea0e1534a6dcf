//! Named tabular sources and the table expressions bound to them.
//!
//! A [`Client`] maps names to [`TableSource`]s. [`Client::table`] resolves a
//! source's schema, applies caller overrides and returns an `UnboundTable`
//! expression. Nothing is read or executed.

mod frame;

#[cfg(test)]
mod mod_tests;

use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use quarry_core::Schema;

use crate::expr::Expr;
use crate::{Error, Result, ops};

pub use frame::Frame;

/// Anything that can describe its columns.
pub trait TableSource: Send + Sync {
    fn schema(&self) -> Result<Schema>;
}

/// Registry of named table sources.
#[derive(Clone, Default)]
pub struct Client {
    sources: IndexMap<String, Arc<dyn TableSource>>,
}

impl Client {
    /// Connect to a set of sources of one type.
    pub fn connect<N, S>(sources: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: Into<String>,
        S: TableSource + 'static,
    {
        sources
            .into_iter()
            .fold(Self::default(), |client, (name, source)| {
                client.with_source(name, Arc::new(source))
            })
    }

    /// Register `source` under `name`. Sources may be shared between names.
    pub fn with_source(mut self, name: impl Into<String>, source: Arc<dyn TableSource>) -> Self {
        self.sources.insert(name.into(), source);
        self
    }

    pub fn list_tables(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Table expression for source `name`.
    ///
    /// `overrides` replaces inferred column types in place and appends
    /// columns the source does not report.
    pub fn table(&self, name: &str, overrides: Option<&Schema>) -> Result<Expr> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_owned()))?;
        let mut schema = source.schema()?;
        if let Some(overrides) = overrides {
            schema = schema.merged(overrides);
        }
        debug!("resolved table `{name}`: {schema}");
        ops::unbound_table().bind().arg(name).arg(schema).construct()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("tables", &self.list_tables())
            .finish()
    }
}
