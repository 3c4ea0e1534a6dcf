//! Enumerations as explicit member tables.

use std::fmt;
use std::sync::Arc;

use quarry_core::Value;

use crate::expr::{Arg, Input};
use crate::{Error, Result, Site};

#[derive(Debug)]
struct EnumInner {
    name: String,
    members: Vec<(String, Value)>,
}

/// An ordered `(member, value)` table.
///
/// Two definitions are the same enumeration only if they are the same
/// allocation; building an identical table twice yields two enumerations.
/// Member values need not be unique. Duplicates only matter when a raw value
/// is looked up.
#[derive(Clone, Debug)]
pub struct EnumDef(Arc<EnumInner>);

impl EnumDef {
    pub fn new<N: Into<String>, V: Into<Value>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (N, V)>,
    ) -> Self {
        Self(Arc::new(EnumInner {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(member, value)| (member.into(), value.into()))
                .collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn len(&self) -> usize {
        self.0.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.members.is_empty()
    }

    /// Member by name.
    pub fn member(&self, name: &str) -> Option<Member> {
        let index = self.0.members.iter().position(|(n, _)| n == name)?;
        Some(Member {
            def: self.clone(),
            index,
        })
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        (0..self.len()).map(|index| Member {
            def: self.clone(),
            index,
        })
    }

    /// Members whose value equals `value`. Numbers compare by value.
    pub fn lookup(&self, value: &Value) -> Vec<Member> {
        self.members()
            .filter(|member| member.value().loosely_equals(value))
            .collect()
    }

    pub(crate) fn validate(&self, input: Input) -> Result<Arg> {
        match input {
            Input::Member(member) if member.def == *self => Ok(Arg::Member(member)),
            Input::Value(value) => {
                let mut matches = self.lookup(&value);
                match matches.len() {
                    0 => Err(Error::mismatch(
                        format!("member of {}", self.name()),
                        format!("{} {value}", value.kind_name()),
                    )),
                    1 => Ok(Arg::Member(matches.remove(0))),
                    _ => Err(Error::AmbiguousEnum {
                        site: Site::default(),
                        value: value.to_string(),
                        members: matches.iter().map(Member::to_string).collect(),
                    }),
                }
            }
            other => Err(Error::mismatch(
                format!("member of {}", self.name()),
                other.describe(),
            )),
        }
    }
}

impl PartialEq for EnumDef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EnumDef {}

/// One member of an [`EnumDef`].
#[derive(Clone, PartialEq, Eq)]
pub struct Member {
    def: EnumDef,
    index: usize,
}

impl Member {
    pub fn def(&self) -> &EnumDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.0.members[self.index].0
    }

    pub fn value(&self) -> &Value {
        &self.def.0.members[self.index].1
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.def.name(), self.name())
    }
}
