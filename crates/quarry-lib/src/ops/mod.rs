//! Builtin op catalog.
//!
//! Each builtin is a lazily built, process-wide [`OpDef`](crate::OpDef)
//! returned by a function of the same name: `ops::add()`, `ops::cast()`.
//! [`from_name`] looks ops up by name.

pub mod builtin;
mod types;


pub use builtin::*;
