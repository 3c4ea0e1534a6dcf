use indoc::indoc;

use crate::config::{Config, IntegerInference};

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.recursion_limit(), Some(256));
    assert_eq!(config.integer_inference(), IntegerInference::Narrowest);
    assert_eq!(Config::new(), config);
}

#[test]
fn builders() {
    let config = Config::new()
        .with_recursion_limit(None)
        .with_integer_inference(IntegerInference::Int64);
    assert_eq!(config.recursion_limit(), None);
    assert_eq!(config.integer_inference(), IntegerInference::Int64);
}

#[test]
fn deserialize_partial() {
    let config: Config = serde_json::from_str(indoc! {r#"
        {
            "integer_inference": "int64"
        }
    "#})
    .unwrap();
    assert_eq!(config.integer_inference(), IntegerInference::Int64);
    assert_eq!(config.recursion_limit(), Some(256));
}

#[test]
fn deserialize_unlimited() {
    let config: Config = serde_json::from_str(r#"{"recursion_limit": null}"#).unwrap();
    assert_eq!(config.recursion_limit(), None);
}

#[test]
fn serialize() {
    let config = Config::new().with_recursion_limit(Some(8));
    insta::assert_snapshot!(serde_json::to_string_pretty(&config).unwrap(), @r#"
    {
      "recursion_limit": 8,
      "integer_inference": "narrowest"
    }
    "#);
}
