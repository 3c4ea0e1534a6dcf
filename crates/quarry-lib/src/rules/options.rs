//! String options: closed sets of accepted strings, matched with or
//! without regard to case.

use std::fmt;

use quarry_core::{Case, Value};

use crate::expr::{Arg, Input};
use crate::{Error, Result};

/// A closed set of accepted strings.
///
/// Case-insensitive sets normalize every accepted input to one canonical
/// case, picked once from the options themselves (see [`Case::majority`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringOptions {
    options: Vec<String>,
    /// `None` when matching is case-sensitive.
    canonical: Option<Case>,
}

impl StringOptions {
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>, case_sensitive: bool) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let canonical =
            (!case_sensitive).then(|| Case::majority(options.iter().map(String::as_str)));
        Self { options, canonical }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.canonical.is_none()
    }

    /// Case accepted inputs are rewritten to. `None` when case-sensitive.
    pub fn canonical_case(&self) -> Option<Case> {
        self.canonical
    }

    /// Normalized form of `s`, if it names an option.
    pub fn normalize(&self, s: &str) -> Option<String> {
        match self.canonical {
            None => self.options.iter().find(|o| *o == s).cloned(),
            Some(case) => {
                let folded = s.to_lowercase();
                self.options
                    .iter()
                    .find(|o| o.to_lowercase() == folded)
                    .map(|o| case.apply(o))
            }
        }
    }

    pub(crate) fn validate(&self, input: Input) -> Result<Arg> {
        if let Input::Value(Value::String(s)) = &input
            && let Some(normalized) = self.normalize(s)
        {
            return Ok(Arg::Str(normalized));
        }
        Err(Error::mismatch(self, input.describe()))
    }
}

impl fmt::Display for StringOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("one of [")?;
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{option:?}")?;
        }
        f.write_str("]")?;
        if self.canonical.is_some() {
            f.write_str(" (any case)")?;
        }
        Ok(())
    }
}
