use indexmap::IndexMap;
use quarry_core::Value;

use crate::expr::{Arg, Expr};
use crate::rules::Rule;

/// Argument descriptor: a rule bound to a name, with optional docs.
///
/// Built with [`Rule::named`]:
///
/// ```
/// use quarry_lib::Rule;
///
/// let spec = Rule::integer().named("digits").with_doc("Decimal places").optional();
/// assert_eq!(spec.doc(), Some("Decimal places"));
/// ```
#[derive(Clone, Debug)]
pub struct ArgSpec {
    name: String,
    rule: Rule,
    doc: Option<String>,
    optional: bool,
    default: Option<Value>,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, rule: Rule) -> Self {
        Self {
            name: name.into(),
            rule,
            doc: None,
            optional: false,
            default: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Value used when the argument is not supplied. Implies optional.
    ///
    /// Defaults go through the rule like any supplied value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Ordered argument descriptors, indexed by name.
#[derive(Clone, Debug, Default)]
pub struct Signature(IndexMap<String, ArgSpec>);

impl Signature {
    /// Build from descriptors. Returns the first duplicated name, if any.
    pub(super) fn build(specs: impl IntoIterator<Item = ArgSpec>) -> Result<Self, String> {
        let mut map = IndexMap::new();
        for spec in specs {
            let name = spec.name.clone();
            if map.insert(name.clone(), spec).is_some() {
                return Err(name);
            }
        }
        Ok(Self(map))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    pub fn get(&self, index: usize) -> Option<&ArgSpec> {
        self.0.get_index(index).map(|(_, spec)| spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgSpec> {
        self.0.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of arguments that must be supplied.
    pub fn required(&self) -> usize {
        self.iter().filter(|spec| !spec.is_optional()).count()
    }

    pub(super) fn accessor(&self, name: &str) -> Option<Accessor<'_>> {
        let (index, _, spec) = self.0.get_full(name)?;
        Some(Accessor { index, spec })
    }
}

/// Read-only accessor for one named argument.
#[derive(Clone, Copy, Debug)]
pub struct Accessor<'a> {
    index: usize,
    spec: &'a ArgSpec,
}

impl<'a> Accessor<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'a str {
        self.spec.name()
    }

    /// Documentation attached when the argument was declared.
    pub fn doc(&self) -> Option<&'a str> {
        self.spec.doc()
    }

    pub fn spec(&self) -> &'a ArgSpec {
        self.spec
    }

    /// This argument on `expr`, if its op declares it at the same position.
    pub fn get<'e>(&self, expr: &'e Expr) -> Option<&'e Arg> {
        if expr.op().def().signature().get(self.index)?.name() != self.name() {
            return None;
        }
        expr.op().args().get(self.index)
    }
}
