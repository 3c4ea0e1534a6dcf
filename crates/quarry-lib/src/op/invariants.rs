//! Definition-time checks excluded from coverage reports.
//!
//! A malformed op definition is a programming error and panics.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::signature::{ArgSpec, Signature};
use crate::rules::Output;

pub(super) fn ensure_signature(op: &str, specs: impl IntoIterator<Item = ArgSpec>) -> Signature {
    Signature::build(specs)
        .unwrap_or_else(|name| panic!("{op}: argument `{name}` declared twice"))
}

/// Context rules may only read arguments validated before them.
pub(super) fn ensure_backward_refs(op: &str, signature: &Signature) {
    for (position, spec) in signature.iter().enumerate() {
        for index in spec.rule().context_refs() {
            assert!(
                index < position,
                "{op}: argument `{}` at position {position} refers to argument {index}, \
                 which is not validated before it",
                spec.name()
            );
        }
    }
}

pub(super) fn ensure_output_refs(op: &str, signature: &Signature, output: &Output) {
    for index in output.refs() {
        assert!(
            index < signature.len(),
            "{op}: output refers to argument {index}, but the op takes {}",
            signature.len()
        );
    }
}
