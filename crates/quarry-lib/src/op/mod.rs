//! Op definitions and construction.
//!
//! An [`OpDef`] is defined once and shared. Constructing it binds raw
//! arguments to its signature, validates them in declared order (each rule
//! sees the arguments normalized before it), resolves the output type and
//! wraps the result in an [`Expr`]. Construction is atomic: on failure no
//! expression exists.

mod bind;
mod invariants;
mod signature;


use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::Config;
use crate::expr::{Arg, Expr, Input, Op};
use crate::rules::{Context, Output};
use crate::{Error, Result};

pub use bind::Binding;
pub use signature::{Accessor, ArgSpec, Signature};

#[derive(Debug)]
struct OpDefInner {
    name: String,
    signature: Signature,
    output: Output,
}

/// Operator definition: name, signature and output rule.
///
/// Cheap to clone. Two definitions are equal only if they are the same
/// definition.
#[derive(Clone)]
pub struct OpDef(Arc<OpDefInner>);

impl OpDef {
    /// Define an op.
    ///
    /// # Panics
    ///
    /// If two arguments share a name, if a context rule refers to an argument
    /// at or after its own position, or if the output refers to a position
    /// past the end of the signature.
    pub fn new(
        name: impl Into<String>,
        args: impl IntoIterator<Item = ArgSpec>,
        output: impl Into<Output>,
    ) -> Self {
        let name = name.into();
        let signature = invariants::ensure_signature(&name, args);
        let output = output.into();
        invariants::ensure_backward_refs(&name, &signature);
        invariants::ensure_output_refs(&name, &signature, &output);
        Self(Arc::new(OpDefInner {
            name,
            signature,
            output,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn signature(&self) -> &Signature {
        &self.0.signature
    }

    pub fn output(&self) -> &Output {
        &self.0.output
    }

    /// Accessor for the argument called `name`.
    pub fn accessor(&self, name: &str) -> Option<Accessor<'_>> {
        self.0.signature.accessor(name)
    }

    /// Construct from positional arguments with the default config.
    pub fn construct(&self, args: Vec<Input>) -> Result<Expr> {
        self.construct_with(args, &Config::default())
    }

    pub fn construct_with(&self, args: Vec<Input>, config: &Config) -> Result<Expr> {
        args.into_iter()
            .fold(self.bind(), Binding::arg)
            .construct_with(config)
    }

    /// Start binding arguments positionally and by keyword.
    pub fn bind(&self) -> Binding<'_> {
        Binding::new(self)
    }

    /// Validate bound slots and build the expression.
    fn resolve(&self, slots: Vec<Option<Input>>, config: &Config) -> Result<Expr> {
        let signature = self.signature();
        let mut args = Vec::with_capacity(signature.len());
        for (spec, slot) in signature.iter().zip(slots) {
            let input = match slot {
                Some(input) => input,
                None => match spec.default() {
                    Some(default) => Input::Value(default.clone()),
                    None => {
                        args.push(Arg::Absent);
                        continue;
                    }
                },
            };
            let cx = Context::new(self, &args, config);
            let arg = spec
                .rule()
                .validate(input, &cx)
                .map_err(|err| err.at_argument(self.name(), spec.name()))?;
            trace!("{}: bound `{}` as {arg:?}", self.name(), spec.name());
            args.push(arg);
        }

        let ty = self
            .output()
            .resolve(&args)
            .map_err(|err| err.at_argument(self.name(), ""))?;
        Ok(Expr::new(Op::new(self.clone(), args), ty))
    }

    fn arity_error(&self, received: usize) -> Error {
        Error::Arity {
            op: self.name().to_owned(),
            min: self.signature().required(),
            max: self.signature().len(),
            received,
        }
    }

    fn rejected(&self, err: Error) -> Error {
        debug!("rejected {}: {err}", self.name());
        err
    }
}

impl PartialEq for OpDef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for OpDef {}

impl fmt::Debug for OpDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpDef").field(&self.0.name).finish()
    }
}

impl fmt::Display for OpDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
