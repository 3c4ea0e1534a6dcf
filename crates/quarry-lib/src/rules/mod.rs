//! Argument rules: validators and normalizers for one argument position.
//!
//! Rules are plain data built once, when an op is defined, and shared by
//! every construction of that op. [`Rule::validate`] is pure: it maps a raw
//! [`Input`] to a normalized [`Arg`] or fails, reading only the
//! [`Context`] (earlier arguments and the active [`Config`]).

mod enums;
mod options;
mod output;
mod value;

#[cfg(test)]
mod enums_tests;

use std::fmt;

use quarry_core::{DataType, TypeClass};

use crate::config::Config;
use crate::expr::{Arg, Input, Shape};
use crate::op::{ArgSpec, OpDef};
use crate::{Error, Result};

pub use enums::{EnumDef, Member};
pub use options::StringOptions;
pub use output::{ComputeSchema, ComputeType, Output, OutputType, ShapeRule};
pub(crate) use output::{arg_dtype, arg_expr};

/// What a rule sees besides its own input.
pub struct Context<'a> {
    op: Option<&'a OpDef>,
    args: &'a [Arg],
    config: &'a Config,
}

impl<'a> Context<'a> {
    pub(crate) fn new(op: &'a OpDef, args: &'a [Arg], config: &'a Config) -> Self {
        Self {
            op: Some(op),
            args,
            config,
        }
    }

    /// Context outside any op: no earlier arguments.
    pub fn detached(config: &'a Config) -> Self {
        Self {
            op: None,
            args: &[],
            config,
        }
    }

    pub fn op(&self) -> Option<&'a OpDef> {
        self.op
    }

    /// Already validated argument at `index`. Only earlier positions exist.
    pub fn arg(&self, index: usize) -> Option<&'a Arg> {
        self.args.get(index)
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }
}

/// Validation strategy for one argument.
#[derive(Clone, Debug)]
pub enum Rule {
    /// Anything, stored unchanged.
    Any,
    Enum(EnumDef),
    StringOptions(StringOptions),
    /// A value expression whose type satisfies `class`. Raw host values are
    /// coerced to scalar literals. `shape: None` accepts both shapes.
    Value {
        class: TypeClass,
        shape: Option<Shape>,
    },
    /// Array value whose elements widen to the given type.
    Array(DataType),
    ListOf {
        rule: Box<Rule>,
        min_len: usize,
    },
    /// First rule that accepts wins.
    OneOf(Vec<Rule>),
    DataType,
    Schema,
    Table,
    /// A value sharing a common type with argument `i`.
    LikeArg(usize),
    /// A value castable to the element type of array argument `i`.
    ElementOfArg(usize),
}

impl Rule {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn enumeration(def: EnumDef) -> Self {
        Self::Enum(def)
    }

    pub fn string_options<S: Into<String>>(
        options: impl IntoIterator<Item = S>,
        case_sensitive: bool,
    ) -> Self {
        Self::StringOptions(StringOptions::new(options, case_sensitive))
    }

    pub fn scalar(class: impl Into<TypeClass>) -> Self {
        Self::Value {
            class: class.into(),
            shape: Some(Shape::Scalar),
        }
    }

    pub fn column(class: impl Into<TypeClass>) -> Self {
        Self::Value {
            class: class.into(),
            shape: Some(Shape::Columnar),
        }
    }

    pub fn value(class: impl Into<TypeClass>) -> Self {
        Self::Value {
            class: class.into(),
            shape: None,
        }
    }

    pub fn integer() -> Self {
        Self::value(TypeClass::Integer)
    }

    pub fn number() -> Self {
        Self::value(TypeClass::Numeric)
    }

    pub fn array(element: DataType) -> Self {
        Self::Array(element)
    }

    pub fn list_of(rule: Rule, min_len: usize) -> Self {
        Self::ListOf {
            rule: Box::new(rule),
            min_len,
        }
    }

    pub fn one_of(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self::OneOf(rules.into_iter().collect())
    }

    pub fn data_type() -> Self {
        Self::DataType
    }

    pub fn schema() -> Self {
        Self::Schema
    }

    pub fn table() -> Self {
        Self::Table
    }

    pub fn like_arg(index: usize) -> Self {
        Self::LikeArg(index)
    }

    pub fn element_of_arg(index: usize) -> Self {
        Self::ElementOfArg(index)
    }

    /// Attach this rule to an argument name.
    pub fn named(self, name: impl Into<String>) -> ArgSpec {
        ArgSpec::new(name, self)
    }

    pub fn validate(&self, input: Input, cx: &Context<'_>) -> Result<Arg> {
        match self {
            Self::Any => Ok(Self::accept_any(input)),
            Self::Enum(def) => def.validate(input),
            Self::StringOptions(options) => options.validate(input),
            Self::Value { class, shape } => value::validate_value(class, *shape, input, cx),
            Self::Array(element) => value::validate_array(element, input, cx),
            Self::ListOf { rule, min_len } => self.validate_list(rule, *min_len, input, cx),
            Self::OneOf(rules) => self.validate_one_of(rules, input, cx),
            Self::DataType => value::validate_data_type(input),
            Self::Schema => value::validate_schema(input),
            Self::Table => value::validate_table(input),
            Self::LikeArg(index) => value::validate_like_arg(*index, input, cx),
            Self::ElementOfArg(index) => value::validate_element_of_arg(*index, input, cx),
        }
    }

    /// Validate outside of any op, with the default config.
    pub fn check(&self, input: impl Into<Input>) -> Result<Arg> {
        let config = Config::default();
        self.validate(input.into(), &Context::detached(&config))
    }

    /// Argument positions this rule reads from its context.
    pub fn context_refs(&self) -> Vec<usize> {
        match self {
            Self::LikeArg(index) | Self::ElementOfArg(index) => vec![*index],
            Self::ListOf { rule, .. } => rule.context_refs(),
            Self::OneOf(rules) => rules.iter().flat_map(Rule::context_refs).collect(),
            _ => Vec::new(),
        }
    }

    fn accept_any(input: Input) -> Arg {
        match input {
            Input::Value(value) => Arg::Value(value),
            Input::Expr(expr) => Arg::Expr(expr),
            Input::Member(member) => Arg::Member(member),
            Input::DataType(dtype) => Arg::DataType(dtype),
            Input::Schema(schema) => Arg::Schema(schema),
            Input::List(items) => Arg::List(items.into_iter().map(Self::accept_any).collect()),
        }
    }

    fn validate_list(
        &self,
        rule: &Rule,
        min_len: usize,
        input: Input,
        cx: &Context<'_>,
    ) -> Result<Arg> {
        let items = match input {
            Input::List(items) => items,
            Input::Value(quarry_core::Value::Array(values)) => {
                values.into_iter().map(Input::Value).collect()
            }
            other => return Err(Error::mismatch(self, other.describe())),
        };
        if items.len() < min_len {
            return Err(Error::mismatch(self, format!("list of {} items", items.len())));
        }
        let normalized = items
            .into_iter()
            .map(|item| rule.validate(item, cx))
            .collect::<Result<Vec<_>>>()?;
        Ok(Arg::List(normalized))
    }

    fn validate_one_of(&self, rules: &[Rule], input: Input, cx: &Context<'_>) -> Result<Arg> {
        for rule in rules {
            match rule.validate(input.clone(), cx) {
                Err(Error::TypeMismatch { .. }) => continue,
                result => return result,
            }
        }
        Err(Error::mismatch(self, input.describe()))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any value"),
            Self::Enum(def) => write!(f, "member of {}", def.name()),
            Self::StringOptions(options) => write!(f, "{options}"),
            Self::Value { class, shape } => match shape {
                Some(Shape::Scalar) => write!(f, "scalar {class}"),
                Some(Shape::Columnar) => write!(f, "column {class}"),
                None => write!(f, "{class} value"),
            },
            Self::Array(element) => write!(f, "array<{element}>"),
            Self::ListOf { rule, min_len: 0 } => write!(f, "list of {rule}"),
            Self::ListOf { rule, min_len } => {
                write!(f, "list of at least {min_len} {rule}")
            }
            Self::OneOf(rules) => {
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{rule}")?;
                }
                Ok(())
            }
            Self::DataType => f.write_str("data type"),
            Self::Schema => f.write_str("schema"),
            Self::Table => f.write_str("table"),
            Self::LikeArg(index) => write!(f, "value like argument {index}"),
            Self::ElementOfArg(index) => write!(f, "element of argument {index}"),
        }
    }
}
