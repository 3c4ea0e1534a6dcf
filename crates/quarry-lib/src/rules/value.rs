//! Value-shaped rules: typed expressions, arrays, data types, tables, and
//! rules that read earlier arguments.

use quarry_core::{DataType, Schema, TypeClass, Value};

use super::Context;
use crate::expr::{Arg, Expr, Input, Shape};
use crate::{Error, Result, literal};

fn describe_expected(class: &TypeClass, shape: Option<Shape>) -> String {
    match shape {
        Some(Shape::Scalar) => format!("scalar {class}"),
        Some(Shape::Columnar) => format!("column {class}"),
        None => format!("{class} value"),
    }
}

/// Turn an input into a value expression, coercing raw host values.
fn to_value_expr(
    input: Input,
    expected: impl FnOnce() -> String,
    cx: &Context<'_>,
) -> Result<Expr> {
    match input {
        Input::Expr(expr) if !expr.ty().is_table() => Ok(expr),
        Input::Value(value) => literal::coerce(value, cx.config()),
        other => Err(Error::mismatch(expected(), other.describe())),
    }
}

pub(super) fn validate_value(
    class: &TypeClass,
    shape: Option<Shape>,
    input: Input,
    cx: &Context<'_>,
) -> Result<Arg> {
    let expected = || describe_expected(class, shape);
    let expr = match input {
        Input::Value(value) => coerce_for_class(value, class, cx)?,
        other => to_value_expr(other, expected, cx)?,
    };

    let type_ok = expr.dtype().is_some_and(|dtype| class.accepts(dtype));
    let shape_ok = shape.is_none() || expr.shape() == shape;
    if !(type_ok && shape_ok) {
        return Err(Error::mismatch(expected(), received(&expr)));
    }
    Ok(Arg::Expr(expr))
}

/// Literal of a raw value. An exact target type the value fits is used
/// in place of an inferred type that does not widen to it.
fn coerce_for_class(value: Value, class: &TypeClass, cx: &Context<'_>) -> Result<Expr> {
    let inferred = literal::infer_dtype(&value, cx.config())?;
    let dtype = match class {
        TypeClass::Exact(target)
            if !inferred.castable_to(target) && literal::fits(&value, target) =>
        {
            target.clone()
        }
        _ => inferred,
    };
    Ok(literal::build(value, dtype))
}

/// What a rejected expression looked like; literals show their value.
fn received(expr: &Expr) -> String {
    match expr.literal_value() {
        Some(value) => format!("{} {value}", value.kind_name()),
        None => expr.ty().to_string(),
    }
}

pub(super) fn validate_array(element: &DataType, input: Input, cx: &Context<'_>) -> Result<Arg> {
    let target = DataType::array(element.clone());
    match input {
        Input::Value(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let ty = literal::infer_element_dtype(item, cx.config())?;
                if !literal::fits(item, element) {
                    return Err(Error::mismatch(
                        &target,
                        format!("element {i} of type {ty}"),
                    ));
                }
            }
            Ok(Arg::Expr(literal::build(Value::Array(items), target)))
        }
        Input::Expr(expr) if expr.dtype().is_some_and(|dtype| dtype.castable_to(&target)) => {
            Ok(Arg::Expr(expr))
        }
        other => Err(Error::mismatch(&target, other.describe())),
    }
}

pub(super) fn validate_data_type(input: Input) -> Result<Arg> {
    match input {
        Input::DataType(dtype) => Ok(Arg::DataType(dtype)),
        Input::Value(Value::String(s)) => Ok(Arg::DataType(s.parse()?)),
        other => Err(Error::mismatch("data type", other.describe())),
    }
}

/// A schema, or a struct value mapping column names to type strings.
pub(super) fn validate_schema(input: Input) -> Result<Arg> {
    match input {
        Input::Schema(schema) => Ok(Arg::Schema(schema)),
        Input::Value(Value::Struct(fields)) => {
            let mut schema = Schema::new();
            for (name, value) in fields {
                let Some(ty) = value.as_str() else {
                    return Err(Error::mismatch(
                        "type string",
                        format!("{} {value} for column `{name}`", value.kind_name()),
                    ));
                };
                schema.insert(name, ty.parse()?);
            }
            Ok(Arg::Schema(schema))
        }
        other => Err(Error::mismatch("schema", other.describe())),
    }
}

pub(super) fn validate_table(input: Input) -> Result<Arg> {
    match input {
        Input::Expr(expr) if expr.ty().is_table() => Ok(Arg::Expr(expr)),
        other => Err(Error::mismatch("table", other.describe())),
    }
}

pub(super) fn validate_like_arg(index: usize, input: Input, cx: &Context<'_>) -> Result<Arg> {
    let reference = cx.arg(index).and_then(Arg::dtype).cloned();
    let expected = || match &reference {
        Some(dtype) => format!("value like {dtype}"),
        None => "value".to_owned(),
    };
    let expr = to_value_expr(input, expected, cx)?;

    // Absent reference argument: nothing to agree with.
    let Some(reference) = &reference else {
        return Ok(Arg::Expr(expr));
    };
    let compatible = expr
        .dtype()
        .is_some_and(|dtype| dtype.common_supertype(reference).is_some());
    if !compatible {
        return Err(Error::mismatch(expected(), received(&expr)));
    }
    Ok(Arg::Expr(expr))
}

pub(super) fn validate_element_of_arg(
    index: usize,
    input: Input,
    cx: &Context<'_>,
) -> Result<Arg> {
    let element = cx
        .arg(index)
        .and_then(Arg::dtype)
        .and_then(DataType::element_type)
        .cloned();
    let Some(element) = element else {
        return Err(Error::mismatch(
            format!("element of array argument {index}"),
            input.describe(),
        ));
    };

    let expr = to_value_expr(input, || element.to_string(), cx)?;
    if !expr.dtype().is_some_and(|dtype| dtype.castable_to(&element)) {
        return Err(Error::mismatch(&element, received(&expr)));
    }
    Ok(Arg::Expr(expr))
}
