use quarry_core::{DataType, Schema, Value};

use super::Expr;
use crate::rules::Member;

/// A raw constructor argument, before validation.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Value(Value),
    Expr(Expr),
    Member(Member),
    DataType(DataType),
    Schema(Schema),
    /// Sequence of arguments that may mix expressions and raw values.
    List(Vec<Input>),
}

impl Input {
    pub fn list<T: Into<Input>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Short description of what was received, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Value(Value::Null) => "null".to_owned(),
            Self::Value(value) => format!("{} {value}", value.kind_name()),
            Self::Expr(expr) => expr.ty().to_string(),
            Self::Member(member) => member.to_string(),
            Self::DataType(dtype) => format!("data type {dtype}"),
            Self::Schema(schema) => format!("schema {schema}"),
            Self::List(items) => format!("list of {} items", items.len()),
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Expr> for Input {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<&Expr> for Input {
    fn from(expr: &Expr) -> Self {
        Self::Expr(expr.clone())
    }
}

impl From<Member> for Input {
    fn from(member: Member) -> Self {
        Self::Member(member)
    }
}

impl From<DataType> for Input {
    fn from(dtype: DataType) -> Self {
        Self::DataType(dtype)
    }
}

impl From<Schema> for Input {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

macro_rules! impl_from_host {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Input {
                fn from(v: $t) -> Self {
                    Self::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_host!(
    i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, &str, String
);

impl<T: Into<Value>> From<Vec<T>> for Input {
    fn from(items: Vec<T>) -> Self {
        Self::Value(Value::from(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Input {
    fn from(v: Option<T>) -> Self {
        Self::Value(Value::from(v))
    }
}
