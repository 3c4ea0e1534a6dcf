use std::sync::Arc;

use quarry_core::{DataType, Schema};

use crate::client::{Client, Frame, TableSource};
use crate::expr::ExprType;
use crate::{Error, Result, ops};

fn client() -> Client {
    Client::connect([
        (
            "df",
            Frame::new()
                .with_column("plain_int64", [1, 2, 3])
                .with_column("plain_strings", ["a", "b", "c"])
                .with_column("plain_float64", [4.0, 5.0, 6.0]),
        ),
        (
            "batting",
            Frame::new()
                .with_column("player", ["x", "y"])
                .with_column("hits", [10, 20]),
        ),
    ])
}

#[test]
fn list_tables() {
    assert_eq!(client().list_tables(), ["df", "batting"]);
}

#[test]
fn table_has_inferred_schema() {
    let t = client().table("df", None).unwrap();
    assert_eq!(
        t.ty().to_string(),
        "table {plain_int64: int64, plain_strings: string, plain_float64: double}"
    );
    assert_eq!(t.name(), "UnboundTable");
}

#[test]
fn overrides_replace_and_append() {
    let overrides: Schema = [
        ("plain_float64", DataType::decimal(4, 3)),
        ("extra", DataType::Date),
    ]
    .into_iter()
    .collect();
    let t = client().table("df", Some(&overrides)).unwrap();
    let schema = t.schema().unwrap();
    assert_eq!(schema.get("plain_float64"), Some(&DataType::decimal(4, 3)));
    assert_eq!(schema.get("plain_int64"), Some(&DataType::Int64));
    assert_eq!(schema.names().last(), Some("extra"));
    assert_eq!(schema.names().position(|n| n == "plain_float64"), Some(2));
}

#[test]
fn missing_table() {
    let err = client().table("nope", None).unwrap_err();
    assert_eq!(err, Error::TableNotFound("nope".into()));
    assert_eq!(err.to_string(), "table `nope` not found");
}

#[test]
fn columns_of_client_tables() {
    let t = client().table("batting", None).unwrap();
    let hits = t.column("hits").unwrap();
    assert_eq!(hits.ty(), &ExprType::column(DataType::Int64));

    let total = ops::sum().construct(crate::inputs![hits]).unwrap();
    assert_eq!(total.ty(), &ExprType::scalar(DataType::Int64));

    let err = t.column("missing").unwrap_err();
    assert_eq!(err.to_string(), "table `batting` has no column `missing`");
}

struct Fixed(Schema);

impl TableSource for Fixed {
    fn schema(&self) -> Result<Schema> {
        Ok(self.0.clone())
    }
}

struct Broken;

impl TableSource for Broken {
    fn schema(&self) -> Result<Schema> {
        Err(Error::TableNotFound("upstream".into()))
    }
}

#[test]
fn custom_sources() {
    let schema: Schema = [("id", DataType::UInt32)].into_iter().collect();
    let shared: Arc<dyn TableSource> = Arc::new(Fixed(schema.clone()));
    let client = Client::default()
        .with_source("a", Arc::clone(&shared))
        .with_source("b", shared)
        .with_source("broken", Arc::new(Broken));

    assert_eq!(client.table("a", None).unwrap().schema(), Some(&schema));
    assert_eq!(client.table("a", None).unwrap(), client.table("a", None).unwrap());
    assert_ne!(client.table("a", None).unwrap(), client.table("b", None).unwrap());
    assert!(client.table("broken", None).is_err());
}

#[test]
fn debug_lists_tables() {
    assert_eq!(
        format!("{:?}", client()),
        r#"Client { tables: ["df", "batting"] }"#
    );
}
