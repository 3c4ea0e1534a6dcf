use quarry_core::{DataType, Schema};

use crate::{Expr, Input, inputs, literal, ops};

fn column(name: &str) -> Expr {
    let schema: Schema = [("a", DataType::Int64), ("flag", DataType::Boolean)]
        .into_iter()
        .collect();
    ops::unbound_table()
        .construct(inputs!["t", schema])
        .and_then(|t| t.column(name))
        .unwrap()
}

#[test]
fn literal_root() {
    let res = literal(vec![1, 2]).unwrap().printer().dump();
    insta::assert_snapshot!(res, @"[1, 2]::array<int8>");
}

#[test]
fn binary_op() {
    let expr = ops::add().construct(inputs![1, 2.5]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r"
    Add -> double
      left: 1::int8
      right: 2.5::double
    ");
}

#[test]
fn without_types() {
    let expr = ops::add().construct(inputs![1, 2.5]).unwrap();
    insta::assert_snapshot!(expr.printer().with_types(false).dump(), @r"
    Add
      left: 1
      right: 2.5
    ");
}

#[test]
fn nested_expressions() {
    let expr = ops::sum().construct(inputs![column("a")]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r#"
    Sum -> int64
      arg:
        TableColumn -> column<int64>
          table:
            UnboundTable -> table {a: int64, flag: boolean}
              name: "t"::string
              schema: {a: int64, flag: boolean}
          name: "a"::string
    "#);
}

#[test]
fn absent_arguments_hidden_by_default() {
    let expr = ops::round().construct(inputs![1.5]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r"
    Round -> int64
      arg: 1.5::double
    ");
    insta::assert_snapshot!(expr.printer().with_absent(true).dump(), @r"
    Round -> int64
      arg: 1.5::double
      digits: -
    ");
}

#[test]
fn list_arguments() {
    let items = Input::list([Input::from(Option::<i64>::None), Input::from(1000)]);
    let expr = ops::coalesce().construct(vec![items]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r"
    Coalesce -> int16
      args:
        [0]: null::null
        [1]: 1000::int16
    ");
}

#[test]
fn defaults_options_and_members() {
    let expr = ops::strip().construct(inputs![" x "]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r#"
    Strip -> string
      arg: " x "::string
      side: "both"
    "#);

    let expr = ops::sort_key().construct(inputs![column("a")]).unwrap();
    insta::assert_snapshot!(expr.printer().with_types(false).dump(), @r#"
    SortKey
      expr:
        TableColumn
          table:
            UnboundTable
              name: "t"
              schema: {a: int64, flag: boolean}
          name: "a"
      order: SortOrder.Ascending
    "#);
}

#[test]
fn data_type_arguments() {
    let expr = ops::cast().construct(inputs![1, "decimal(4, 3)"]).unwrap();
    insta::assert_snapshot!(expr.printer().dump(), @r"
    Cast -> decimal(4, 3)
      arg: 1::int8
      to: decimal(4, 3)
    ");
}
