//! Construction settings.

use serde::{Deserialize, Serialize};

const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// How integral host values are typed by literal coercion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerInference {
    /// Smallest fitting signed width, `uint64` above `i64::MAX`.
    #[default]
    Narrowest,
    /// Always `int64`, `uint64` above `i64::MAX`.
    Int64,
}

/// Settings shared by every rule during one construction.
///
/// The default is what [`OpDef::construct`](crate::OpDef::construct) uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    recursion_limit: Option<u32>,
    integer_inference: IntegerInference,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
            integer_inference: IntegerInference::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting depth limit for literal coercion. None = infinite.
    ///
    /// Exceeding it fails construction with
    /// [`Error::RecursionLimitExceeded`](crate::Error::RecursionLimitExceeded).
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_integer_inference(mut self, policy: IntegerInference) -> Self {
        self.integer_inference = policy;
        self
    }

    pub fn recursion_limit(&self) -> Option<u32> {
        self.recursion_limit
    }

    pub fn integer_inference(&self) -> IntegerInference {
        self.integer_inference
    }
}
