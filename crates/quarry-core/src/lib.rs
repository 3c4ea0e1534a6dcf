#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Quarry expression typing.
//!
//! - **Types**: `DataType` (closed type system with widening) and
//!   `TypeClass` (predicates over types)
//! - **Values**: `Value`, the raw host values handed to op constructors
//! - **Schemas**: `Schema`, ordered column types for table expressions

pub mod datatype;
pub mod schema;
pub mod type_class;
pub mod utils;
pub mod value;

#[cfg(test)]
mod datatype_tests;

pub use datatype::{DataType, ParseTypeError};
pub use schema::Schema;
pub use type_class::TypeClass;
pub use utils::Case;
pub use value::Value;
