use std::thread;

use quarry_core::DataType;

use crate::{Error, Expr, Input, OpDef, Rule, Site, inputs, literal, ops};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn shared_types_are_send_and_sync() {
    assert_send_sync::<Expr>();
    assert_send_sync::<OpDef>();
    assert_send_sync::<Rule>();
    assert_send_sync::<Error>();
}

#[test]
fn expressions_cross_threads() {
    let expr = ops::add().construct(inputs![1, 2]).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let expr = expr.clone();
            thread::spawn(move || ops::multiply().construct(inputs![&expr, i]).unwrap())
        })
        .collect();
    for handle in handles {
        let product = handle.join().unwrap();
        assert_eq!(product.dtype(), Some(&DataType::Int8));
    }
}

#[test]
fn builtin_defs_are_shared_across_threads() {
    let here = ops::sum();
    let there = thread::spawn(ops::sum).join().unwrap();
    assert_eq!(here, there);
}

#[test]
fn site_display() {
    assert_eq!(Site::default().to_string(), "value");
    let site = Site {
        op: "Round".into(),
        arg: "digits".into(),
    };
    assert_eq!(site.to_string(), "Round(digits)");
}

#[test]
fn at_argument_keeps_existing_site() {
    let err = Error::mismatch("integer", "string \"a\"")
        .at_argument("Inner", "x")
        .at_argument("Outer", "y");
    assert_eq!(
        err.to_string(),
        r#"Inner(x): expected integer, got string "a""#
    );
}

#[test]
fn at_argument_ignores_unsited_errors() {
    let err = Error::RecursionLimitExceeded.at_argument("Add", "left");
    assert_eq!(err, Error::RecursionLimitExceeded);
    assert_eq!(err.site(), None);
}

#[test]
fn error_messages() {
    let err = Error::Arity {
        op: "Round".into(),
        min: 1,
        max: 2,
        received: 3,
    };
    assert_eq!(err.to_string(), "Round takes 1 to 2 arguments, got 3");

    let err = Error::Arity {
        op: "Add".into(),
        min: 2,
        max: 2,
        received: 1,
    };
    assert_eq!(err.to_string(), "Add takes 2 arguments, got 1");

    let err = Error::AmbiguousEnum {
        site: Site::default(),
        value: "1".into(),
        members: vec!["Dup.a".into(), "Dup.b".into()],
    };
    assert_eq!(err.to_string(), "value: value 1 is ambiguous between Dup.a, Dup.b");
}

#[test]
fn invalid_type_wraps_parse_error() {
    let err = ops::cast()
        .construct(inputs![literal(1).unwrap(), "integer"])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidType(_)));
    assert_eq!(
        err.to_string(),
        "invalid data type `integer`: unknown type name `integer`"
    );
}

#[test]
fn inputs_macro_converts_each_argument() {
    let lit = literal(1).unwrap();
    let args = inputs![&lit, "a", DataType::Int8, vec![1, 2]];
    assert_eq!(args.len(), 4);
    assert_eq!(args[0], Input::Expr(lit));
    assert_eq!(args[2], Input::DataType(DataType::Int8));
    assert!(matches!(args[3], Input::Value(_)));
}
