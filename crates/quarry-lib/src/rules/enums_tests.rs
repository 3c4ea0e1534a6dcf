use quarry_core::{DataType, Value};

use crate::expr::Arg;
use crate::rules::{EnumDef, Rule};
use crate::{Error, OpDef, inputs};

fn foo() -> EnumDef {
    EnumDef::new("Foo", [("a", 1), ("b", 2)])
}

fn my_op(def: &EnumDef) -> OpDef {
    OpDef::new(
        "MyOp",
        [Rule::enumeration(def.clone()).named("value")],
        DataType::Boolean,
    )
}

#[test]
fn raw_value_selects_member() {
    let foo = foo();
    let expr = my_op(&foo).construct(inputs![2]).unwrap();
    let member = expr.arg("value").and_then(Arg::as_member).unwrap();
    assert_eq!(member, &foo.member("b").unwrap());
    assert_eq!(member.to_string(), "Foo.b");
}

#[test]
fn member_is_accepted_unchanged() {
    let foo = foo();
    let a = foo.member("a").unwrap();
    let expr = my_op(&foo).construct(inputs![a.clone()]).unwrap();
    assert_eq!(expr.op().args(), [Arg::Member(a)]);
}

#[test]
fn every_member_roundtrips_by_value_and_identity() {
    let foo = foo();
    let rule = Rule::enumeration(foo.clone());
    for member in foo.members() {
        assert_eq!(
            rule.check(member.value().clone()).unwrap(),
            Arg::Member(member.clone())
        );
        assert_eq!(rule.check(member.clone()).unwrap(), Arg::Member(member));
    }
}

#[test]
fn unknown_value_is_rejected() {
    let err = my_op(&foo()).construct(inputs![3]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "MyOp(value): expected member of Foo, got integer 3"
    );
}

#[test]
fn member_of_another_enum_is_rejected() {
    let bar = EnumDef::new("Bar", [("a", 1), ("b", 2)]);
    let err = my_op(&foo())
        .construct(inputs![bar.member("a").unwrap()])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "MyOp(value): expected member of Foo, got Bar.a"
    );
}

#[test]
fn identical_tables_are_distinct_enums() {
    let twin = foo();
    let err = Rule::enumeration(foo())
        .check(twin.member("a").unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn duplicate_value_is_ambiguous() {
    let dup = EnumDef::new("Dup", [("a", 1), ("b", 1), ("c", 2)]);
    let op = my_op(&dup);

    let err = op.construct(inputs![1]).unwrap_err();
    let Error::AmbiguousEnum { site, members, .. } = &err else {
        panic!("expected AmbiguousEnum, got {err:?}");
    };
    assert_eq!(site.to_string(), "MyOp(value)");
    assert_eq!(members, &["Dup.a", "Dup.b"]);

    assert!(op.construct(inputs![2]).is_ok());
}

#[test]
fn duplicate_members_bind_directly() {
    let dup = EnumDef::new("Dup", [("a", 1), ("b", 1)]);
    let op = my_op(&dup);
    for name in ["a", "b"] {
        let member = dup.member(name).unwrap();
        let expr = op.construct(inputs![member.clone()]).unwrap();
        assert_eq!(expr.arg("value"), Some(&Arg::Member(member)));
    }
}

#[test]
fn numbers_match_across_representations() {
    let foo = foo();
    assert_eq!(
        Rule::enumeration(foo.clone()).check(2.0).unwrap(),
        Arg::Member(foo.member("b").unwrap())
    );
}

#[test]
fn large_integers_match_exactly() {
    let exact = (1i64 << 53) + 1;
    let limits = EnumDef::new(
        "Limits",
        [
            ("exact", Value::from(exact)),
            ("rounded", Value::from((1i64 << 53) as f64)),
        ],
    );
    assert_eq!(
        Rule::enumeration(limits.clone()).check(exact).unwrap(),
        Arg::Member(limits.member("exact").unwrap())
    );
    assert_eq!(limits.lookup(&Value::from(1i64 << 53)).len(), 1);
}

#[test]
fn string_valued_members() {
    let order = EnumDef::new("Order", [("Asc", "asc"), ("Desc", "desc")]);
    let rule = Rule::enumeration(order.clone());
    assert_eq!(
        rule.check("desc").unwrap(),
        Arg::Member(order.member("Desc").unwrap())
    );
    assert!(rule.check("DESC").is_err());
    assert_eq!(order.lookup(&Value::from("asc")).len(), 1);
}
