//! Canonical data type definitions.
//!
//! `DataType` is the closed set of semantic types a value expression can
//! carry. Widening is explicit and total over the enum:
//! - [`DataType::castable_to`] is the implicit-cast relation used by rules.
//! - [`DataType::common_supertype`] picks the highest-precedence type of two,
//!   used when inferring the element type of nested literals.
//!
//! Types print and parse in a compact textual form (`int8`, `double`,
//! `decimal(4, 3)`, `array<double>`, `struct<a: int8>`), which is also their
//! serde representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic data types.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DataType {
    /// Type of the `null` literal. Castable to every other type.
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    /// Single precision float, printed as `float`.
    Float32,
    /// Double precision float, printed as `double`.
    Float64,
    Decimal {
        precision: u8,
        scale: u8,
    },
    String,
    Binary,
    Date,
    Time,
    Timestamp {
        timezone: Option<String>,
    },
    /// Homogeneous sequence.
    Array(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    /// Record with ordered, named fields.
    Struct(Vec<(String, DataType)>),
}

const MAX_DECIMAL_PRECISION: u8 = 38;

impl DataType {
    pub fn array(element: DataType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn struct_of<N: Into<String>>(fields: impl IntoIterator<Item = (N, DataType)>) -> Self {
        Self::Struct(
            fields
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self::Decimal { precision, scale }
    }

    pub fn timestamp(timezone: Option<&str>) -> Self {
        Self::Timestamp {
            timezone: timezone.map(str::to_owned),
        }
    }

    /// Narrowest signed integer type able to hold `value`.
    pub fn smallest_signed_for(value: i64) -> Self {
        if i8::try_from(value).is_ok() {
            Self::Int8
        } else if i16::try_from(value).is_ok() {
            Self::Int16
        } else if i32::try_from(value).is_ok() {
            Self::Int32
        } else {
            Self::Int64
        }
    }

    fn signed_with_width(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::Int8),
            16 => Some(Self::Int16),
            32 => Some(Self::Int32),
            64 => Some(Self::Int64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64
        )
    }

    pub fn is_integer(&self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Self::Decimal { .. })
    }

    /// Integers, floats and decimals.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating() || self.is_decimal()
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Whether this type contains other types (array, map, struct).
    pub fn is_nested(&self) -> bool {
        self.is_array() || self.is_map() || self.is_struct()
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Bit width of integer and floating types.
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            Self::Int8 | Self::UInt8 => Some(8),
            Self::Int16 | Self::UInt16 => Some(16),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(32),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(64),
            _ => None,
        }
    }

    /// Whether a value of this type implicitly widens to `target`.
    ///
    /// The relation is reflexive. `null` widens to everything; integers widen
    /// to wider integers of compatible signedness, to `double` and to
    /// `decimal`; small integers also widen to `float`. Containers widen
    /// element-wise.
    pub fn castable_to(&self, target: &DataType) -> bool {
        if self == target {
            return true;
        }

        match (self, target) {
            (Self::Null, _) => true,
            (a, b) if a.is_signed_integer() && b.is_signed_integer() => {
                a.bit_width() < b.bit_width()
            }
            (a, b) if a.is_unsigned_integer() && b.is_integer() => a.bit_width() < b.bit_width(),
            (a, Self::Float64) if a.is_integer() => true,
            (a, Self::Float32) if a.is_integer() => a.bit_width().is_some_and(|w| w <= 16),
            (a, Self::Decimal { .. }) if a.is_integer() => true,
            (Self::Float32, Self::Float64) => true,
            (Self::Decimal { .. }, Self::Float64) => true,
            (
                Self::Decimal {
                    precision: p1,
                    scale: s1,
                },
                Self::Decimal {
                    precision: p2,
                    scale: s2,
                },
            ) => s2 >= s1 && p2.saturating_sub(*s2) >= p1.saturating_sub(*s1),
            (Self::Date, Self::Timestamp { .. }) => true,
            (Self::Array(a), Self::Array(b)) => a.castable_to(b),
            (Self::Map(ak, av), Self::Map(bk, bv)) => ak.castable_to(bk) && av.castable_to(bv),
            (Self::Struct(a), Self::Struct(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((an, at), (bn, bt))| an == bn && at.castable_to(bt))
            }
            _ => false,
        }
    }

    /// Highest-precedence type both `self` and `other` widen to.
    ///
    /// Returns `None` when the two types have nothing in common
    /// (e.g. `string` and `int8`).
    pub fn common_supertype(&self, other: &DataType) -> Option<DataType> {
        if self.castable_to(other) {
            return Some(other.clone());
        }
        if other.castable_to(self) {
            return Some(self.clone());
        }

        match (self, other) {
            // Signed/unsigned mix: the unsigned side is at least as wide as the
            // signed side here, so double its width.
            (a, b) if a.is_integer() && b.is_integer() => {
                let width = a.bit_width()?.max(b.bit_width()?);
                Self::signed_with_width(width * 2)
            }
            (a, Self::Float32) | (Self::Float32, a) if a.is_integer() || a.is_decimal() => {
                Some(Self::Float64)
            }
            (
                Self::Decimal {
                    precision: p1,
                    scale: s1,
                },
                Self::Decimal {
                    precision: p2,
                    scale: s2,
                },
            ) => {
                let scale = *s1.max(s2);
                let digits = p1.saturating_sub(*s1).max(p2.saturating_sub(*s2));
                let precision = digits.saturating_add(scale).min(MAX_DECIMAL_PRECISION);
                Some(Self::decimal(precision, scale))
            }
            (Self::Array(a), Self::Array(b)) => Some(Self::array(a.common_supertype(b)?)),
            (Self::Map(ak, av), Self::Map(bk, bv)) => Some(Self::map(
                ak.common_supertype(bk)?,
                av.common_supertype(bv)?,
            )),
            (Self::Struct(a), Self::Struct(b)) if a.len() == b.len() => {
                let mut fields = Vec::with_capacity(a.len());
                for ((an, at), (bn, bt)) in a.iter().zip(b) {
                    if an != bn {
                        return None;
                    }
                    fields.push((an.clone(), at.common_supertype(bt)?));
                }
                Some(Self::Struct(fields))
            }
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean => f.write_str("boolean"),
            Self::Int8 => f.write_str("int8"),
            Self::Int16 => f.write_str("int16"),
            Self::Int32 => f.write_str("int32"),
            Self::Int64 => f.write_str("int64"),
            Self::UInt8 => f.write_str("uint8"),
            Self::UInt16 => f.write_str("uint16"),
            Self::UInt32 => f.write_str("uint32"),
            Self::UInt64 => f.write_str("uint64"),
            Self::Float32 => f.write_str("float"),
            Self::Float64 => f.write_str("double"),
            Self::Decimal { precision, scale } => write!(f, "decimal({precision}, {scale})"),
            Self::String => f.write_str("string"),
            Self::Binary => f.write_str("binary"),
            Self::Date => f.write_str("date"),
            Self::Time => f.write_str("time"),
            Self::Timestamp { timezone: None } => f.write_str("timestamp"),
            Self::Timestamp {
                timezone: Some(tz),
            } => write!(f, "timestamp('{tz}')"),
            Self::Array(element) => write!(f, "array<{element}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Struct(fields) => {
                f.write_str("struct<")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Failure to parse the textual form of a [`DataType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid data type `{input}`: {reason}")]
pub struct ParseTypeError {
    pub input: String,
    pub reason: String,
}

impl FromStr for DataType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeParser { src: s, pos: 0 };
        parser
            .parse_complete()
            .map_err(|reason| ParseTypeError {
                input: s.to_owned(),
                reason,
            })
    }
}

impl From<DataType> for String {
    fn from(ty: DataType) -> Self {
        ty.to_string()
    }
}

impl TryFrom<String> for DataType {
    type Error = ParseTypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Recursive-descent parser for the textual type form.
struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl TypeParser<'_> {
    fn parse_complete(&mut self) -> Result<DataType, String> {
        let ty = self.parse_type()?;
        self.skip_ws();
        if let Some(c) = self.peek() {
            return Err(format!("unexpected `{c}` at offset {}", self.pos));
        }
        Ok(ty)
    }

    fn parse_type(&mut self) -> Result<DataType, String> {
        let name = self.ident()?;
        let ty = match name.to_ascii_lowercase().as_str() {
            "null" => DataType::Null,
            "boolean" | "bool" => DataType::Boolean,
            "int8" => DataType::Int8,
            "int16" => DataType::Int16,
            "int32" => DataType::Int32,
            "int64" | "int" => DataType::Int64,
            "uint8" => DataType::UInt8,
            "uint16" => DataType::UInt16,
            "uint32" => DataType::UInt32,
            "uint64" => DataType::UInt64,
            "float" | "float32" => DataType::Float32,
            "double" | "float64" => DataType::Float64,
            "string" | "str" => DataType::String,
            "binary" => DataType::Binary,
            "date" => DataType::Date,
            "time" => DataType::Time,
            "decimal" => {
                self.expect('(')?;
                let precision = self.number()?;
                self.expect(',')?;
                let scale = self.number()?;
                self.expect(')')?;
                if scale > precision {
                    return Err(format!(
                        "decimal scale {scale} exceeds precision {precision}"
                    ));
                }
                DataType::decimal(precision, scale)
            }
            "timestamp" => {
                if self.eat('(') {
                    let timezone = self.quoted()?;
                    self.expect(')')?;
                    DataType::Timestamp {
                        timezone: Some(timezone),
                    }
                } else {
                    DataType::Timestamp { timezone: None }
                }
            }
            "array" => {
                self.expect('<')?;
                let element = self.parse_type()?;
                self.expect('>')?;
                DataType::array(element)
            }
            "map" => {
                self.expect('<')?;
                let key = self.parse_type()?;
                self.expect(',')?;
                let value = self.parse_type()?;
                self.expect('>')?;
                DataType::map(key, value)
            }
            "struct" => {
                self.expect('<')?;
                let mut fields = Vec::new();
                if !self.eat('>') {
                    loop {
                        let field = self.ident()?;
                        self.expect(':')?;
                        fields.push((field, self.parse_type()?));
                        if self.eat(',') {
                            continue;
                        }
                        self.expect('>')?;
                        break;
                    }
                }
                DataType::Struct(fields)
            }
            other => return Err(format!("unknown type name `{other}`")),
        };
        Ok(ty)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek()
            && c.is_whitespace()
        {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            return true;
        }
        false
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        if self.eat(expected) {
            return Ok(());
        }
        match self.peek() {
            Some(c) => Err(format!(
                "expected `{expected}` at offset {}, found `{c}`",
                self.pos
            )),
            None => Err(format!("expected `{expected}`, found end of input")),
        }
    }

    fn ident(&mut self) -> Result<String, String> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek()
            && (c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(format!("expected a name at offset {start}"));
        }
        Ok(self.src[start..self.pos].to_owned())
    }

    fn number(&mut self) -> Result<u8, String> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = &self.src[start..self.pos];
        let value: u8 = digits
            .parse()
            .map_err(|_| format!("expected a number at offset {start}"))?;
        if value > MAX_DECIMAL_PRECISION {
            return Err(format!(
                "{value} exceeds the maximum decimal precision {MAX_DECIMAL_PRECISION}"
            ));
        }
        Ok(value)
    }

    fn quoted(&mut self) -> Result<String, String> {
        self.skip_ws();
        let Some(quote) = self.peek().filter(|c| *c == '\'' || *c == '"') else {
            return Err(format!("expected a quoted string at offset {}", self.pos));
        };
        self.pos += 1;
        let start = self.pos;
        let Some(len) = self.src[start..].find(quote) else {
            return Err("unterminated quoted string".to_owned());
        };
        self.pos = start + len + 1;
        Ok(self.src[start..start + len].to_owned())
    }
}
