//! Quarry: typed, validated expression trees for analytical queries.
//!
//! Every operator declares an ordered signature of named argument rules.
//! Constructing a node validates and normalizes each raw argument against
//! its rule, then derives the node's output type.
//!
//! # Example
//!
//! ```
//! use quarry_lib::{inputs, ops};
//!
//! let sum = ops::add().construct(inputs![1, 2.5]).expect("numeric arguments");
//! assert_eq!(sum.ty().to_string(), "double");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod client;
pub mod config;
pub mod expr;
pub mod literal;
pub mod op;
pub mod ops;
pub mod rules;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod lib_tests;

use std::fmt;

pub use quarry_core::{DataType, Schema, TypeClass, Value};

pub use client::{Client, Frame, TableSource};
pub use config::{Config, IntegerInference};
pub use expr::{Arg, Expr, ExprType, Input, Shape};
pub use literal::{literal, literal_typed};
pub use op::{ArgSpec, OpDef};
pub use rules::{EnumDef, Member, OutputType, Rule, ShapeRule};

/// Where a validation failure happened: the op being constructed and the
/// argument being validated.
///
/// Rules raise errors with an empty site; the binder fills it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pub op: String,
    pub arg: String,
}

impl Site {
    pub fn is_unset(&self) -> bool {
        self.op.is_empty() && self.arg.is_empty()
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.op.as_str(), self.arg.as_str()) {
            ("", "") => f.write_str("value"),
            (op, "") => f.write_str(op),
            (op, arg) => write!(f, "{op}({arg})"),
        }
    }
}

/// Errors raised while defining or constructing expressions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A value does not satisfy its rule.
    #[error("{site}: expected {expected}, got {received}")]
    TypeMismatch {
        site: Site,
        expected: String,
        received: String,
    },

    /// A raw value matches several enumeration members.
    #[error("{site}: value {value} is ambiguous between {}", .members.join(", "))]
    AmbiguousEnum {
        site: Site,
        value: String,
        members: Vec<String>,
    },

    /// Elements of a nested literal have no common type.
    #[error("{site}: elements of type {left} and {right} have no common type")]
    ElementTypeConflict {
        site: Site,
        left: DataType,
        right: DataType,
    },

    #[error("{op} takes {} arguments, got {received}", arity_range(.min, .max))]
    Arity {
        op: String,
        min: usize,
        max: usize,
        received: usize,
    },

    #[error("{op} has no argument named `{name}`")]
    UnknownArgument { op: String, name: String },

    #[error("{op} got multiple values for argument `{name}`")]
    DuplicateArgument { op: String, name: String },

    /// Literal nesting exceeds the configured recursion limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error(transparent)]
    InvalidType(#[from] quarry_core::ParseTypeError),

    #[error("table `{0}` not found")]
    TableNotFound(String),

    #[error("table `{table}` has no column `{column}`")]
    UnknownColumn { table: String, column: String },
}

fn arity_range(min: &usize, max: &usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    }
}

impl Error {
    pub(crate) fn mismatch(expected: impl ToString, received: impl ToString) -> Self {
        Self::TypeMismatch {
            site: Site::default(),
            expected: expected.to_string(),
            received: received.to_string(),
        }
    }

    /// Attach the op and argument a rule error was raised for.
    ///
    /// Errors that already carry a site keep it, so the innermost argument
    /// wins when validation nests.
    pub fn at_argument(mut self, op: &str, arg: &str) -> Self {
        if let Some(site) = self.site_mut()
            && site.is_unset()
        {
            site.op = op.to_owned();
            site.arg = arg.to_owned();
        }
        self
    }

    pub fn site(&self) -> Option<&Site> {
        match self {
            Self::TypeMismatch { site, .. }
            | Self::AmbiguousEnum { site, .. }
            | Self::ElementTypeConflict { site, .. } => Some(site),
            _ => None,
        }
    }

    fn site_mut(&mut self) -> Option<&mut Site> {
        match self {
            Self::TypeMismatch { site, .. }
            | Self::AmbiguousEnum { site, .. }
            | Self::ElementTypeConflict { site, .. } => Some(site),
            _ => None,
        }
    }
}

/// Result type for expression construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a `Vec<Input>` from heterogeneous raw arguments.
///
/// ```
/// use quarry_lib::{inputs, Input};
///
/// let args: Vec<Input> = inputs![1, "a", vec![1.0, 2.0]];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! inputs {
    ($($arg:expr),* $(,)?) => {
        ::std::vec![$($crate::Input::from($arg)),*]
    };
}
