use quarry_core::{DataType, Schema, TypeClass, Value};

use crate::expr::{Arg, Expr, ExprType, Input, Shape};
use crate::rules::{OutputType, Rule};
use crate::{Error, OpDef, inputs, literal, literal_typed, ops};

fn table() -> Expr {
    let schema: Schema = [("a", DataType::Int64), ("b", DataType::String)]
        .into_iter()
        .collect();
    ops::unbound_table().construct(inputs!["t", schema]).unwrap()
}

#[test]
fn equality_is_structural() {
    let a = ops::add().construct(inputs![1, 2]).unwrap();
    let b = ops::add().construct(inputs![1, 2]).unwrap();
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);

    let c = ops::add().construct(inputs![2, 1]).unwrap();
    assert_ne!(a, c);
    let d = ops::multiply().construct(inputs![1, 2]).unwrap();
    assert_ne!(a, d);
}

#[test]
fn coerced_argument_equals_explicit_literal() {
    let op = OpDef::new(
        "MyOp",
        [Rule::scalar(TypeClass::Numeric).named("value")],
        OutputType::TypeOfArg(0),
    );
    let expr = op.construct(inputs![1]).unwrap();
    assert_eq!(expr.arg("value"), Some(&Arg::Expr(literal(1).unwrap())));
    assert_eq!(expr.ty(), &ExprType::scalar(DataType::Int8));
}

#[test]
fn literal_type_participates_in_equality() {
    let narrow = literal(1).unwrap();
    let wide = literal_typed(1, DataType::Int64).unwrap();
    assert_eq!(narrow.literal_value(), wide.literal_value());
    assert_ne!(narrow, wide);
}

#[test]
fn nan_literals_are_equal() {
    assert_eq!(literal(f64::NAN).unwrap(), literal(f64::NAN).unwrap());
    let sum = |x: f64| ops::add().construct(inputs![x, 1]).unwrap();
    assert_eq!(sum(f64::NAN), sum(f64::NAN));
}

#[test]
fn args_by_name() {
    let expr = ops::round().construct(inputs![1.5]).unwrap();
    assert!(expr.arg("arg").and_then(Arg::as_expr).is_some());
    assert_eq!(expr.arg("digits"), Some(&Arg::Absent));
    assert_eq!(expr.arg("nope"), None);
    assert_eq!(expr.op().args().len(), 2);
    assert_eq!(expr.name(), "Round");
}

#[test]
fn literal_accessors() {
    let lit = literal("hi").unwrap();
    assert!(lit.is_literal());
    assert_eq!(lit.literal_value(), Some(&Value::from("hi")));
    assert_eq!(lit.to_string(), r#""hi"::string"#);

    let sum = ops::add().construct(inputs![1, 2]).unwrap();
    assert!(!sum.is_literal());
    assert_eq!(sum.literal_value(), None);
    assert_eq!(sum.to_string(), "Add -> int8");
}

#[test]
fn table_expressions() {
    let t = table();
    assert!(t.ty().is_table());
    assert_eq!(t.dtype(), None);
    assert_eq!(t.shape(), None);
    assert_eq!(t.schema().map(Schema::len), Some(2));
    assert_eq!(t.to_string(), "UnboundTable -> table {a: int64, b: string}");
}

#[test]
fn column_of_table() {
    let a = table().column("a").unwrap();
    assert_eq!(a.ty(), &ExprType::column(DataType::Int64));
    assert_eq!(a.shape(), Some(Shape::Columnar));

    let err = table().column("missing").unwrap_err();
    assert_eq!(err, Error::UnknownColumn {
        table: "t".into(),
        column: "missing".into(),
    });
}

#[test]
fn cast_and_between() {
    let a = table().column("a").unwrap();
    let cast = a.cast("double").unwrap();
    assert_eq!(cast.ty().to_string(), "column<double>");
    assert_eq!(a.cast(DataType::Int32).unwrap().dtype(), Some(&DataType::Int32));

    let between = a.between(0, 10).unwrap();
    assert_eq!(between.ty(), &ExprType::column(DataType::Boolean));
    assert!(a.between(0, "z").is_err());
}

#[test]
fn arg_helpers() {
    let lit = literal(1).unwrap();
    let list = Arg::List(vec![
        Arg::Expr(lit.clone()),
        Arg::Absent,
        Arg::List(vec![Arg::Expr(lit.clone())]),
    ]);
    assert_eq!(list.exprs().len(), 2);
    assert_eq!(Arg::DataType(DataType::Int8).dtype(), Some(&DataType::Int8));
    assert_eq!(Arg::Expr(lit).dtype(), Some(&DataType::Int8));
    assert!(Arg::Absent.is_absent());
    assert_eq!(Arg::Str("x".into()).as_str(), Some("x"));
}

#[test]
fn describe_inputs() {
    assert_eq!(Input::from(Option::<i32>::None).describe(), "null");
    assert_eq!(Input::from(true).describe(), "boolean true");
    assert_eq!(Input::from(DataType::Int8).describe(), "data type int8");
    assert_eq!(Input::list([1, 2, 3]).describe(), "list of 3 items");
    assert_eq!(Input::from(table()).describe(), "table {a: int64, b: string}");
    assert_eq!(
        Input::from(ops::sort_order().member("Ascending").unwrap()).describe(),
        "SortOrder.Ascending"
    );
}

#[test]
fn expr_type_display() {
    assert_eq!(ExprType::scalar(DataType::Int8).to_string(), "int8");
    assert_eq!(
        ExprType::column(DataType::array(DataType::String)).to_string(),
        "column<array<string>>"
    );
}
