use std::sync::LazyLock;

use quarry_core::utils::to_snake_case;
use quarry_core::{DataType, TypeClass};

use super::types;
use crate::op::OpDef;
use crate::rules::{EnumDef, OutputType, Rule};

macro_rules! define_ops {
    (
        $(
            $fn_name:ident => {
                name: $name:literal,
                args: [$($arg:expr),* $(,)?],
                output: $output:expr $(,)?
            }
        ),* $(,)?
    ) => {
        $(
            #[doc = concat!("The `", $name, "` op.")]
            pub fn $fn_name() -> OpDef {
                static OP: LazyLock<OpDef> =
                    LazyLock::new(|| OpDef::new($name, [$($arg),*], $output));
                OpDef::clone(&OP)
            }
        )*

        /// Builtin op by name, either `ArrayLength` or `array_length`.
        pub fn from_name(s: &str) -> Option<OpDef> {
            let name = to_snake_case(s);
            $(
                if name == stringify!($fn_name) {
                    return Some($fn_name());
                }
            )*
            None
        }

        pub fn all() -> Vec<OpDef> {
            vec![
                $(
                    $fn_name(),
                )*
            ]
        }
    };
}

/// Units accepted by [`timestamp_truncate`], in any case.
pub const TIME_UNITS: [&str; 11] = [
    "YEAR",
    "QUARTER",
    "MONTH",
    "WEEK",
    "DAY",
    "HOUR",
    "MINUTE",
    "SECOND",
    "MILLISECOND",
    "MICROSECOND",
    "NANOSECOND",
];

/// Sort direction, keyed by `"asc"` / `"desc"`.
pub fn sort_order() -> EnumDef {
    static ORDER: LazyLock<EnumDef> = LazyLock::new(|| {
        EnumDef::new("SortOrder", [("Ascending", "asc"), ("Descending", "desc")])
    });
    EnumDef::clone(&ORDER)
}

define_ops! {
    literal => {
        name: "Literal",
        args: [
            Rule::any().named("value").with_doc("Host value"),
            Rule::data_type().named("dtype").with_doc("Inferred or declared type"),
        ],
        output: OutputType::Computed(types::literal_type).scalar(),
    },
    unbound_table => {
        name: "UnboundTable",
        args: [
            Rule::scalar(TypeClass::String).named("name"),
            Rule::schema().named("schema"),
        ],
        output: OutputType::Table(types::unbound_table_schema),
    },
    table_column => {
        name: "TableColumn",
        args: [
            Rule::table().named("table"),
            Rule::scalar(TypeClass::String).named("name").with_doc("Column name"),
        ],
        output: OutputType::Computed(types::table_column_type).columnar(),
    },
    cast => {
        name: "Cast",
        args: [
            Rule::value(TypeClass::Any).named("arg"),
            Rule::data_type().named("to").with_doc("Target type"),
        ],
        output: OutputType::DtypeOfArg(1),
    },
    add => {
        name: "Add",
        args: [Rule::number().named("left"), Rule::number().named("right")],
        output: OutputType::HighestPrecedence(vec![0, 1]),
    },
    multiply => {
        name: "Multiply",
        args: [Rule::number().named("left"), Rule::number().named("right")],
        output: OutputType::HighestPrecedence(vec![0, 1]),
    },
    between => {
        name: "Between",
        args: [
            Rule::value(TypeClass::Any).named("arg"),
            Rule::like_arg(0).named("lower").with_doc("Inclusive lower bound"),
            Rule::like_arg(0).named("upper").with_doc("Inclusive upper bound"),
        ],
        output: DataType::Boolean,
    },
    round => {
        name: "Round",
        args: [
            Rule::number().named("arg"),
            Rule::scalar(TypeClass::Integer)
                .named("digits")
                .with_doc("Decimal places to keep")
                .optional(),
        ],
        output: OutputType::Computed(types::round_type),
    },
    sum => {
        name: "Sum",
        args: [
            Rule::column(TypeClass::Numeric).named("arg"),
            Rule::column(TypeClass::Boolean)
                .named("where")
                .with_doc("Rows to include")
                .optional(),
        ],
        output: OutputType::Computed(types::sum_type).scalar(),
    },
    coalesce => {
        name: "Coalesce",
        args: [Rule::list_of(Rule::value(TypeClass::Any), 1).named("args")],
        output: OutputType::HighestPrecedence(vec![0]),
    },
    array_length => {
        name: "ArrayLength",
        args: [Rule::value(TypeClass::Array).named("arg")],
        output: DataType::Int64,
    },
    array_index => {
        name: "ArrayIndex",
        args: [
            Rule::value(TypeClass::Array).named("arg"),
            Rule::integer().named("index").with_doc("Zero-based position"),
        ],
        output: OutputType::ElementOfArg(0),
    },
    array_contains => {
        name: "ArrayContains",
        args: [
            Rule::value(TypeClass::Array).named("arg"),
            Rule::element_of_arg(0).named("other"),
        ],
        output: DataType::Boolean,
    },
    timestamp_truncate => {
        name: "TimestampTruncate",
        args: [
            Rule::value(TypeClass::Temporal).named("arg"),
            Rule::string_options(TIME_UNITS, false).named("unit"),
        ],
        output: OutputType::TypeOfArg(0),
    },
    strip => {
        name: "Strip",
        args: [
            Rule::value(TypeClass::String).named("arg"),
            Rule::string_options(["both", "left", "right"], false)
                .named("side")
                .with_default("both"),
        ],
        output: OutputType::TypeOfArg(0),
    },
    sort_key => {
        name: "SortKey",
        args: [
            Rule::value(TypeClass::Any).named("expr"),
            Rule::enumeration(sort_order()).named("order").with_default("asc"),
        ],
        output: OutputType::TypeOfArg(0),
    },
}
