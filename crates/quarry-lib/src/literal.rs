//! Literal coercion: raw host values to typed, immutable literal expressions.
//!
//! Inference picks the narrowest type that holds the value. Sequences take
//! the common supertype of their elements, so `[1, 2.5]` is `array<double>`
//! and `[1, "a"]` is an [`Error::ElementTypeConflict`].

use quarry_core::{DataType, Value};

use crate::config::{Config, IntegerInference};
use crate::expr::{Arg, Expr, ExprType, Op};
use crate::{Error, Result, Site, ops};

/// Literal of `value` with its inferred type.
pub fn literal(value: impl Into<Value>) -> Result<Expr> {
    coerce(value.into(), &Config::default())
}

/// Literal of `value` with a declared type. The value must fit it.
pub fn literal_typed(value: impl Into<Value>, dtype: DataType) -> Result<Expr> {
    coerce_typed(value.into(), dtype, &Config::default())
}

/// Narrowest data type for `value`.
pub fn infer_dtype(value: &Value, config: &Config) -> Result<DataType> {
    Inference::new(config).infer(value)
}

pub(crate) fn coerce(value: Value, config: &Config) -> Result<Expr> {
    let dtype = infer_dtype(&value, config)?;
    Ok(build(value, dtype))
}

pub(crate) fn coerce_typed(value: Value, dtype: DataType, config: &Config) -> Result<Expr> {
    let inferred = infer_dtype(&value, config)?;
    if !fits(&value, &dtype) {
        return Err(Error::mismatch(
            &dtype,
            format!("{} {value} of type {inferred}", value.kind_name()),
        ));
    }
    Ok(build(value, dtype))
}

/// Wrap an already typed value. Callers guarantee `value` fits `dtype`.
pub(crate) fn build(value: Value, dtype: DataType) -> Expr {
    let args = vec![Arg::Value(value), Arg::DataType(dtype.clone())];
    Expr::new(Op::new(ops::literal(), args), ExprType::scalar(dtype))
}

/// Element type of a value nested one level inside a sequence.
pub(crate) fn infer_element_dtype(value: &Value, config: &Config) -> Result<DataType> {
    Inference::new(config).nested(|this| this.infer(value))
}

/// Whether `value` can be stored as `target`. Integers are checked by
/// value, so `1` fits `uint8` although it infers as `int8`.
pub(crate) fn fits(value: &Value, target: &DataType) -> bool {
    match (value, target) {
        (Value::Null, _) => true,
        (Value::Int(i), t) if t.is_integer() => integer_fits(i128::from(*i), t),
        (Value::UInt(u), t) if t.is_integer() => integer_fits(i128::from(*u), t),
        (Value::Int(i), t) => DataType::smallest_signed_for(*i).castable_to(t),
        (Value::UInt(_), t) => DataType::UInt64.castable_to(t),
        (Value::Bool(_), t) => DataType::Boolean.castable_to(t),
        (Value::Float(_), t) => DataType::Float64.castable_to(t),
        (Value::String(_), t) => DataType::String.castable_to(t),
        (Value::Array(items), DataType::Array(element)) => {
            items.iter().all(|item| fits(item, element))
        }
        (Value::Map(pairs), DataType::Map(key_ty, value_ty)) => {
            pairs.iter().all(|(k, v)| fits(k, key_ty) && fits(v, value_ty))
        }
        (Value::Struct(fields), DataType::Struct(types)) => {
            fields.len() == types.len()
                && fields
                    .iter()
                    .zip(types)
                    .all(|((name, v), (field, ty))| name == field && fits(v, ty))
        }
        _ => false,
    }
}

fn integer_fits(v: i128, target: &DataType) -> bool {
    let (min, max) = match target {
        DataType::Int8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
        DataType::Int16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
        DataType::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        DataType::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
        DataType::UInt8 => (0, i128::from(u8::MAX)),
        DataType::UInt16 => (0, i128::from(u16::MAX)),
        DataType::UInt32 => (0, i128::from(u32::MAX)),
        DataType::UInt64 => (0, i128::from(u64::MAX)),
        _ => return false,
    };
    (min..=max).contains(&v)
}

/// Type inference over nested values, bounded by the recursion limit.
struct Inference {
    integers: IntegerInference,
    recursion_limit: Option<u32>,
    depth: u32,
}

impl Inference {
    fn new(config: &Config) -> Self {
        Self {
            integers: config.integer_inference(),
            recursion_limit: config.recursion_limit(),
            depth: 0,
        }
    }

    fn infer(&mut self, value: &Value) -> Result<DataType> {
        match value {
            Value::Null => Ok(DataType::Null),
            Value::Bool(_) => Ok(DataType::Boolean),
            Value::Int(i) => Ok(self.integer(*i)),
            Value::UInt(u) => Ok(i64::try_from(*u).map_or(DataType::UInt64, |i| self.integer(i))),
            Value::Float(_) => Ok(DataType::Float64),
            Value::String(_) => Ok(DataType::String),
            Value::Array(items) => self.nested(|this| {
                let element = this.common(items.iter())?;
                Ok(DataType::array(element))
            }),
            Value::Map(pairs) => self.nested(|this| {
                let key = this.common(pairs.iter().map(|(k, _)| k))?;
                let value = this.common(pairs.iter().map(|(_, v)| v))?;
                Ok(DataType::map(key, value))
            }),
            Value::Struct(fields) => self.nested(|this| {
                let mut types = Vec::with_capacity(fields.len());
                for (name, v) in fields {
                    types.push((name.clone(), this.infer(v)?));
                }
                Ok(DataType::Struct(types))
            }),
        }
    }

    fn integer(&self, i: i64) -> DataType {
        match self.integers {
            IntegerInference::Narrowest => DataType::smallest_signed_for(i),
            IntegerInference::Int64 => DataType::Int64,
        }
    }

    /// Common supertype of all values, `null` when there are none.
    fn common<'v>(&mut self, values: impl Iterator<Item = &'v Value>) -> Result<DataType> {
        let mut acc = DataType::Null;
        for value in values {
            let ty = self.infer(value)?;
            acc = match acc.common_supertype(&ty) {
                Some(common) => common,
                None => {
                    return Err(Error::ElementTypeConflict {
                        site: Site::default(),
                        left: acc,
                        right: ty,
                    });
                }
            };
        }
        Ok(acc)
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.recursion_limit.is_some_and(|limit| self.depth >= limit) {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
