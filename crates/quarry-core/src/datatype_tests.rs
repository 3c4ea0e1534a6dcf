use crate::{DataType, TypeClass};

fn parse(s: &str) -> DataType {
    s.parse().unwrap()
}

#[test]
fn smallest_signed_for_picks_narrowest_width() {
    assert_eq!(DataType::smallest_signed_for(1), DataType::Int8);
    assert_eq!(DataType::smallest_signed_for(-128), DataType::Int8);
    assert_eq!(DataType::smallest_signed_for(128), DataType::Int16);
    assert_eq!(DataType::smallest_signed_for(-40_000), DataType::Int32);
    assert_eq!(DataType::smallest_signed_for(1 << 40), DataType::Int64);
}

#[test]
fn integer_widening() {
    assert!(DataType::Int8.castable_to(&DataType::Int64));
    assert!(!DataType::Int64.castable_to(&DataType::Int8));
    assert!(DataType::UInt8.castable_to(&DataType::Int16));
    assert!(!DataType::UInt8.castable_to(&DataType::Int8));
    assert!(!DataType::Int8.castable_to(&DataType::UInt64));
    assert!(DataType::UInt16.castable_to(&DataType::UInt32));
}

#[test]
fn numeric_widening_to_floats_and_decimals() {
    assert!(DataType::Int64.castable_to(&DataType::Float64));
    assert!(DataType::Int16.castable_to(&DataType::Float32));
    assert!(!DataType::Int32.castable_to(&DataType::Float32));
    assert!(DataType::Float32.castable_to(&DataType::Float64));
    assert!(!DataType::Float64.castable_to(&DataType::Float32));
    assert!(DataType::Int32.castable_to(&DataType::decimal(10, 2)));
    assert!(DataType::decimal(4, 3).castable_to(&DataType::decimal(10, 3)));
    assert!(!DataType::decimal(10, 3).castable_to(&DataType::decimal(4, 3)));
    assert!(!DataType::Float64.castable_to(&DataType::Int64));
}

#[test]
fn null_widens_to_everything() {
    assert!(DataType::Null.castable_to(&DataType::String));
    assert!(DataType::Null.castable_to(&DataType::array(DataType::Int8)));
    assert!(!DataType::String.castable_to(&DataType::Null));
}

#[test]
fn containers_widen_elementwise() {
    let ints = DataType::array(DataType::Int8);
    let doubles = DataType::array(DataType::Float64);
    assert!(ints.castable_to(&doubles));
    assert!(!doubles.castable_to(&ints));
    assert!(DataType::array(DataType::Null).castable_to(&doubles));

    let a = DataType::struct_of([("a", DataType::Int8)]);
    let b = DataType::struct_of([("a", DataType::Int64)]);
    let c = DataType::struct_of([("b", DataType::Int64)]);
    assert!(a.castable_to(&b));
    assert!(!a.castable_to(&c));
}

#[test]
fn common_supertype_of_mixed_numbers() {
    assert_eq!(
        DataType::Int8.common_supertype(&DataType::Float64),
        Some(DataType::Float64)
    );
    assert_eq!(
        DataType::Int16.common_supertype(&DataType::Int8),
        Some(DataType::Int16)
    );
    assert_eq!(
        DataType::Int8.common_supertype(&DataType::UInt8),
        Some(DataType::Int16)
    );
    assert_eq!(
        DataType::Int8.common_supertype(&DataType::UInt32),
        Some(DataType::Int64)
    );
    assert_eq!(DataType::Int8.common_supertype(&DataType::UInt64), None);
    assert_eq!(
        DataType::Int32.common_supertype(&DataType::Float32),
        Some(DataType::Float64)
    );
    assert_eq!(
        DataType::decimal(4, 3).common_supertype(&DataType::decimal(6, 1)),
        Some(DataType::decimal(8, 3))
    );
}

#[test]
fn common_supertype_rejects_unrelated_types() {
    assert_eq!(DataType::String.common_supertype(&DataType::Int8), None);
    assert_eq!(
        DataType::array(DataType::String).common_supertype(&DataType::array(DataType::Int8)),
        None
    );
}

#[test]
fn common_supertype_absorbs_null() {
    assert_eq!(
        DataType::Null.common_supertype(&DataType::String),
        Some(DataType::String)
    );
    assert_eq!(
        DataType::array(DataType::Float64).common_supertype(&DataType::array(DataType::Null)),
        Some(DataType::array(DataType::Float64))
    );
}

#[test]
fn display_names() {
    assert_eq!(DataType::Float64.to_string(), "double");
    assert_eq!(DataType::Float32.to_string(), "float");
    assert_eq!(DataType::decimal(4, 3).to_string(), "decimal(4, 3)");
    assert_eq!(
        DataType::array(DataType::Float64).to_string(),
        "array<double>"
    );
    assert_eq!(
        DataType::map(DataType::String, DataType::Int64).to_string(),
        "map<string, int64>"
    );
    assert_eq!(
        DataType::struct_of([("a", DataType::Int8), ("b", DataType::String)]).to_string(),
        "struct<a: int8, b: string>"
    );
    assert_eq!(
        DataType::timestamp(Some("UTC")).to_string(),
        "timestamp('UTC')"
    );
}

#[test]
fn parse_simple_and_aliases() {
    assert_eq!(parse("double"), DataType::Float64);
    assert_eq!(parse("float64"), DataType::Float64);
    assert_eq!(parse("INT"), DataType::Int64);
    assert_eq!(parse("bool"), DataType::Boolean);
    assert_eq!(parse("  string "), DataType::String);
    assert_eq!(parse("timestamp"), DataType::timestamp(None));
}

#[test]
fn parse_parameterized() {
    assert_eq!(parse("decimal(4, 3)"), DataType::decimal(4, 3));
    assert_eq!(parse("array<int64>"), DataType::array(DataType::Int64));
    assert_eq!(
        parse("map<string, array<double>>"),
        DataType::map(DataType::String, DataType::array(DataType::Float64))
    );
    assert_eq!(
        parse("struct<a: int8, b: struct<c: string>>"),
        DataType::struct_of([
            ("a", DataType::Int8),
            ("b", DataType::struct_of([("c", DataType::String)])),
        ])
    );
    assert_eq!(
        parse("timestamp('America/New_York')"),
        DataType::timestamp(Some("America/New_York"))
    );
}

#[test]
fn display_then_parse_is_identity() {
    let ty = DataType::struct_of([
        ("xs", DataType::array(DataType::decimal(10, 2))),
        ("at", DataType::timestamp(Some("UTC"))),
    ]);
    assert_eq!(parse(&ty.to_string()), ty);
}

#[test]
fn parse_errors() {
    let err = "array<int64".parse::<DataType>().unwrap_err();
    assert_eq!(err.input, "array<int64");
    assert_eq!(err.reason, "expected `>`, found end of input");

    let err = "integer".parse::<DataType>().unwrap_err();
    assert_eq!(err.reason, "unknown type name `integer`");

    let err = "decimal(2, 4)".parse::<DataType>().unwrap_err();
    assert_eq!(err.reason, "decimal scale 4 exceeds precision 2");

    let err = "int8 int8".parse::<DataType>().unwrap_err();
    assert_eq!(err.to_string(), "invalid data type `int8 int8`: unexpected `i` at offset 5");
}

#[test]
fn serializes_as_type_string() {
    let ty = DataType::array(DataType::Float64);
    let json = serde_json::to_string(&ty).unwrap();
    assert_eq!(json, r#""array<double>""#);

    let back: DataType = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ty);
}

#[test]
fn type_classes() {
    assert!(TypeClass::Numeric.accepts(&DataType::Int8));
    assert!(TypeClass::Numeric.accepts(&DataType::Float64));
    assert!(TypeClass::Numeric.accepts(&DataType::decimal(4, 3)));
    assert!(!TypeClass::Numeric.accepts(&DataType::String));
    assert!(TypeClass::Integer.accepts(&DataType::UInt16));
    assert!(!TypeClass::Integer.accepts(&DataType::Float32));
    assert!(TypeClass::Temporal.accepts(&DataType::Date));
    assert!(TypeClass::Exact(DataType::Float64).accepts(&DataType::Int32));
    assert!(!TypeClass::Exact(DataType::Int8).accepts(&DataType::Int32));
    assert_eq!(TypeClass::Numeric.to_string(), "numeric");
    assert_eq!(TypeClass::from(DataType::Float64).to_string(), "double");
}
