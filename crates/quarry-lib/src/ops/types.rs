//! Computed output types of builtin ops.

use quarry_core::{DataType, Schema, Value};

use crate::expr::{Arg, Expr};
use crate::rules::{arg_dtype, arg_expr};
use crate::{Error, Result, literal};

/// Declared type of a literal, which its host value must fit.
pub(super) fn literal_type(args: &[Arg]) -> Result<DataType> {
    let dtype = arg_dtype(args, 1)?;
    let Some(value) = args.first().and_then(Arg::as_value) else {
        return Err(Error::mismatch("host value", "expression"));
    };
    if !literal::fits(value, dtype) {
        return Err(Error::mismatch(
            dtype,
            format!("{} {value}", value.kind_name()),
        ));
    }
    Ok(dtype.clone())
}

pub(super) fn unbound_table_schema(args: &[Arg]) -> Result<Schema> {
    args.get(1)
        .and_then(Arg::as_schema)
        .cloned()
        .ok_or_else(|| Error::mismatch("schema", "nothing"))
}

/// Name a table expression was bound with, or its op name.
pub(crate) fn table_name(table: &Expr) -> String {
    table
        .arg("name")
        .and_then(Arg::as_expr)
        .and_then(Expr::literal_value)
        .and_then(Value::as_str)
        .map_or_else(|| table.name().to_owned(), str::to_owned)
}

pub(super) fn table_column_type(args: &[Arg]) -> Result<DataType> {
    let table = arg_expr(args, 0)?;
    let name_expr = arg_expr(args, 1)?;
    let Some(name) = name_expr.literal_value().and_then(Value::as_str) else {
        return Err(Error::mismatch("column name literal", name_expr.ty()));
    };
    table
        .schema()
        .and_then(|schema| schema.get(name))
        .cloned()
        .ok_or_else(|| Error::UnknownColumn {
            table: table_name(table),
            column: name.to_owned(),
        })
}

/// Without `digits`, floats round to `int64`. Integers and decimals keep
/// their type.
pub(super) fn round_type(args: &[Arg]) -> Result<DataType> {
    let dtype = arg_dtype(args, 0)?;
    let has_digits = args.get(1).is_some_and(|arg| !arg.is_absent());
    if has_digits || !dtype.is_floating() {
        Ok(dtype.clone())
    } else {
        Ok(DataType::Int64)
    }
}

pub(super) fn sum_type(args: &[Arg]) -> Result<DataType> {
    let dtype = arg_dtype(args, 0)?;
    Ok(match dtype {
        t if t.is_signed_integer() => DataType::Int64,
        t if t.is_unsigned_integer() => DataType::UInt64,
        t if t.is_floating() => DataType::Float64,
        DataType::Decimal { scale, .. } => DataType::decimal(38, *scale),
        other => other.clone(),
    })
}
