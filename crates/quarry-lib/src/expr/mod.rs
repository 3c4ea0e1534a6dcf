//! Immutable, typed expression trees.
//!
//! An [`Expr`] is a shared `(Op, ExprType)` pair. The op holds its
//! definition and the normalized argument list produced by binding; the type
//! was resolved once, at construction. Nothing is mutated afterwards, so
//! expressions are cheap to clone and safe to share across threads.

mod input;
mod printer;

#[cfg(test)]
mod expr_tests;
#[cfg(test)]
mod printer_tests;

use std::fmt;
use std::sync::Arc;

use quarry_core::{DataType, Schema, Value};

use crate::op::OpDef;
use crate::rules::Member;
use crate::{Result, inputs, ops};

pub use input::Input;
pub use printer::ExprPrinter;

/// Whether a value expression yields one value or one value per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    Columnar,
}

/// Resolved type of an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprType {
    Value { dtype: DataType, shape: Shape },
    Table(Schema),
}

impl ExprType {
    pub fn scalar(dtype: DataType) -> Self {
        Self::Value {
            dtype,
            shape: Shape::Scalar,
        }
    }

    pub fn column(dtype: DataType) -> Self {
        Self::Value {
            dtype,
            shape: Shape::Columnar,
        }
    }

    pub fn dtype(&self) -> Option<&DataType> {
        match self {
            Self::Value { dtype, .. } => Some(dtype),
            Self::Table(_) => None,
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Value { shape, .. } => Some(*shape),
            Self::Table(_) => None,
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            Self::Table(schema) => Some(schema),
            Self::Value { .. } => None,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value {
                dtype,
                shape: Shape::Scalar,
            } => write!(f, "{dtype}"),
            Self::Value {
                dtype,
                shape: Shape::Columnar,
            } => write!(f, "column<{dtype}>"),
            Self::Table(schema) => write!(f, "table {schema}"),
        }
    }
}

/// A normalized argument, as stored on an [`Op`] after validation.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// Optional argument that was not supplied and has no default.
    Absent,
    /// Raw value accepted unchanged by an `any` rule.
    Value(Value),
    Expr(Expr),
    Member(Member),
    /// Canonical string option.
    Str(String),
    DataType(DataType),
    Schema(Schema),
    List(Vec<Arg>),
}

impl Arg {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_expr(&self) -> Option<&Expr> {
        match self {
            Self::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Self::Member(member) => Some(member),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Arg]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The data type this argument carries: a `DataType` argument itself,
    /// or the type of a value expression.
    pub fn dtype(&self) -> Option<&DataType> {
        match self {
            Self::DataType(dtype) => Some(dtype),
            Self::Expr(expr) => expr.dtype(),
            _ => None,
        }
    }

    /// Expressions in this argument, descending into lists.
    pub fn exprs(&self) -> Vec<&Expr> {
        let mut out = Vec::new();
        self.collect_exprs(&mut out);
        out
    }

    fn collect_exprs<'a>(&'a self, out: &mut Vec<&'a Expr>) {
        match self {
            Self::Expr(expr) => out.push(expr),
            Self::List(items) => items.iter().for_each(|item| item.collect_exprs(out)),
            _ => {}
        }
    }
}

/// An operator instance: its definition plus normalized arguments.
///
/// `args` has exactly one entry per signature position.
#[derive(Clone, Debug, PartialEq)]
pub struct Op {
    def: OpDef,
    args: Vec<Arg>,
}

impl Op {
    pub(crate) fn new(def: OpDef, args: Vec<Arg>) -> Self {
        debug_assert_eq!(def.signature().len(), args.len());
        Self { def, args }
    }

    pub fn def(&self) -> &OpDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Argument by descriptor name.
    pub fn arg(&self, name: &str) -> Option<&Arg> {
        let index = self.def.signature().index_of(name)?;
        self.args.get(index)
    }
}

#[derive(Debug)]
struct ExprNode {
    op: Op,
    ty: ExprType,
}

/// Immutable typed expression. Equality is structural.
#[derive(Clone, Debug)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    pub(crate) fn new(op: Op, ty: ExprType) -> Self {
        Self(Arc::new(ExprNode { op, ty }))
    }

    pub fn op(&self) -> &Op {
        &self.0.op
    }

    pub fn name(&self) -> &str {
        self.0.op.name()
    }

    pub fn ty(&self) -> &ExprType {
        &self.0.ty
    }

    pub fn dtype(&self) -> Option<&DataType> {
        self.0.ty.dtype()
    }

    pub fn shape(&self) -> Option<Shape> {
        self.0.ty.shape()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.0.ty.schema()
    }

    /// Argument by descriptor name.
    pub fn arg(&self, name: &str) -> Option<&Arg> {
        self.0.op.arg(name)
    }

    pub fn is_literal(&self) -> bool {
        self.0.op.def == ops::literal()
    }

    /// Host value of a literal expression.
    pub fn literal_value(&self) -> Option<&Value> {
        if !self.is_literal() {
            return None;
        }
        self.arg("value").and_then(Arg::as_value)
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn printer(&self) -> ExprPrinter<'_> {
        ExprPrinter::new(self)
    }

    /// Column `name` of a table expression.
    pub fn column(&self, name: &str) -> Result<Expr> {
        ops::table_column().construct(inputs![self, name])
    }

    /// Cast to `to`, a [`DataType`] or its textual form.
    pub fn cast(&self, to: impl Into<Input>) -> Result<Expr> {
        ops::cast().construct(vec![self.into(), to.into()])
    }

    pub fn between(&self, lower: impl Into<Input>, upper: impl Into<Input>) -> Result<Expr> {
        ops::between().construct(vec![self.into(), lower.into(), upper.into()])
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.ty == other.0.ty && self.0.op == other.0.op)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal_value() {
            Some(value) => write!(f, "{value}::{}", self.ty()),
            None => write!(f, "{} -> {}", self.name(), self.ty()),
        }
    }
}
