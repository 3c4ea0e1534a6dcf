use super::OpDef;
use crate::config::Config;
use crate::expr::{Expr, Input};
use crate::{Error, Result};

/// Binds raw arguments to an op's signature, positionally and by keyword.
///
/// Binding errors are held until [`construct`](Self::construct), so calls
/// chain without intermediate results. The first error wins.
///
/// ```
/// use quarry_lib::ops;
///
/// let rounded = ops::round().bind().arg(1.25).kwarg("digits", 1).construct();
/// assert!(rounded.is_ok());
/// ```
#[derive(Debug)]
pub struct Binding<'d> {
    def: &'d OpDef,
    slots: Vec<Option<Input>>,
    next_positional: usize,
    supplied: usize,
    error: Option<Error>,
}

impl<'d> Binding<'d> {
    pub(super) fn new(def: &'d OpDef) -> Self {
        Self {
            def,
            slots: vec![None; def.signature().len()],
            next_positional: 0,
            supplied: 0,
            error: None,
        }
    }

    /// Bind the next positional argument.
    pub fn arg(mut self, input: impl Into<Input>) -> Self {
        let index = self.next_positional;
        self.next_positional += 1;
        self.supplied += 1;
        // Surplus positionals are reported as an arity error at the end.
        if index < self.slots.len() {
            self.fill(index, input.into());
        }
        self
    }

    /// Bind an argument by descriptor name.
    pub fn kwarg(mut self, name: &str, input: impl Into<Input>) -> Self {
        self.supplied += 1;
        let def = self.def;
        match def.signature().index_of(name) {
            Some(index) => self.fill(index, input.into()),
            None => self.fail(Error::UnknownArgument {
                op: def.name().to_owned(),
                name: name.to_owned(),
            }),
        }
        self
    }

    pub fn construct(self) -> Result<Expr> {
        self.construct_with(&Config::default())
    }

    pub fn construct_with(self, config: &Config) -> Result<Expr> {
        let def = self.def;
        self.finish()
            .and_then(|slots| def.resolve(slots, config))
            .map_err(|err| def.rejected(err))
    }

    fn fill(&mut self, index: usize, input: Input) {
        if self.slots[index].is_some() {
            let def = self.def;
            let name = def.signature().get(index).map_or("", |spec| spec.name());
            let err = Error::DuplicateArgument {
                op: def.name().to_owned(),
                name: name.to_owned(),
            };
            self.fail(err);
            return;
        }
        self.slots[index] = Some(input);
    }

    fn fail(&mut self, err: Error) {
        self.error.get_or_insert(err);
    }

    fn finish(self) -> Result<Vec<Option<Input>>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let signature = self.def.signature();
        let missing = signature
            .iter()
            .zip(&self.slots)
            .any(|(spec, slot)| slot.is_none() && !spec.is_optional());
        if self.next_positional > signature.len() || missing {
            return Err(self.def.arity_error(self.supplied));
        }
        Ok(self.slots)
    }
}
