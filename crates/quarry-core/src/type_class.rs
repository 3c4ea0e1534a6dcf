//! Type predicates used by value rules.
//!
//! A closed set of classes instead of ad hoc predicate functions, so that
//! every rule's expectation can be printed and matched exhaustively.

use std::fmt;

use crate::DataType;

/// A predicate over [`DataType`]s.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeClass {
    Any,
    Boolean,
    /// Integers, floats and decimals.
    Numeric,
    Integer,
    Floating,
    Decimal,
    String,
    Temporal,
    Array,
    Map,
    Struct,
    /// Any type that implicitly widens to the given one.
    Exact(DataType),
}

impl TypeClass {
    pub fn accepts(&self, ty: &DataType) -> bool {
        match self {
            Self::Any => true,
            Self::Boolean => ty.is_boolean(),
            Self::Numeric => ty.is_numeric(),
            Self::Integer => ty.is_integer(),
            Self::Floating => ty.is_floating(),
            Self::Decimal => ty.is_decimal(),
            Self::String => ty.is_string(),
            Self::Temporal => ty.is_temporal(),
            Self::Array => ty.is_array(),
            Self::Map => ty.is_map(),
            Self::Struct => ty.is_struct(),
            Self::Exact(target) => ty.castable_to(target),
        }
    }
}

impl From<DataType> for TypeClass {
    fn from(ty: DataType) -> Self {
        Self::Exact(ty)
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Boolean => f.write_str("boolean"),
            Self::Numeric => f.write_str("numeric"),
            Self::Integer => f.write_str("integer"),
            Self::Floating => f.write_str("floating"),
            Self::Decimal => f.write_str("decimal"),
            Self::String => f.write_str("string"),
            Self::Temporal => f.write_str("temporal"),
            Self::Array => f.write_str("array"),
            Self::Map => f.write_str("map"),
            Self::Struct => f.write_str("struct"),
            Self::Exact(ty) => write!(f, "{ty}"),
        }
    }
}
