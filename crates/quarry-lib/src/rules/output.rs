//! Output type rules.
//!
//! An op's output is resolved once, after every argument has been
//! validated. The data type comes from an [`OutputType`]; the shape of value
//! outputs from a [`ShapeRule`].

use quarry_core::{DataType, Schema};

use crate::expr::{Arg, Expr, ExprType, Shape};
use crate::{Error, Result, Site};

/// Computes an output data type from the validated arguments.
pub type ComputeType = fn(&[Arg]) -> Result<DataType>;

/// Computes a table schema from the validated arguments.
pub type ComputeSchema = fn(&[Arg]) -> Result<Schema>;

#[derive(Clone, Debug)]
pub enum OutputType {
    Fixed(DataType),
    /// Resolved type of argument `i`, verbatim, shape included.
    TypeOfArg(usize),
    /// The data type carried by argument `i` (a data type argument, or the
    /// type of a value argument).
    DtypeOfArg(usize),
    /// Common supertype of the value arguments at these positions. List
    /// arguments contribute every item.
    HighestPrecedence(Vec<usize>),
    /// Element type of array argument `i`.
    ElementOfArg(usize),
    Computed(ComputeType),
    /// Table output. Shape rules do not apply.
    Table(ComputeSchema),
}

impl OutputType {
    pub fn scalar(self) -> Output {
        Output::new(self, ShapeRule::Scalar)
    }

    pub fn columnar(self) -> Output {
        Output::new(self, ShapeRule::Columnar)
    }

    pub fn like_args(self) -> Output {
        Output::new(self, ShapeRule::LikeArgs)
    }
}

/// How the shape of a value output is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeRule {
    /// Columnar if any expression argument is columnar, scalar otherwise.
    #[default]
    LikeArgs,
    Scalar,
    Columnar,
}

impl ShapeRule {
    pub fn resolve(self, args: &[Arg]) -> Shape {
        match self {
            Self::Scalar => Shape::Scalar,
            Self::Columnar => Shape::Columnar,
            Self::LikeArgs => {
                let columnar = args
                    .iter()
                    .flat_map(Arg::exprs)
                    .any(|expr| expr.shape() == Some(Shape::Columnar));
                if columnar {
                    Shape::Columnar
                } else {
                    Shape::Scalar
                }
            }
        }
    }
}

/// Output type rule plus shape rule.
#[derive(Clone, Debug)]
pub struct Output {
    ty: OutputType,
    shape: ShapeRule,
}

impl Output {
    pub fn new(ty: OutputType, shape: ShapeRule) -> Self {
        Self { ty, shape }
    }

    pub fn ty(&self) -> &OutputType {
        &self.ty
    }

    pub fn shape(&self) -> ShapeRule {
        self.shape
    }

    /// Argument positions the output reads.
    pub fn refs(&self) -> Vec<usize> {
        match &self.ty {
            OutputType::TypeOfArg(index)
            | OutputType::DtypeOfArg(index)
            | OutputType::ElementOfArg(index) => vec![*index],
            OutputType::HighestPrecedence(positions) => positions.clone(),
            OutputType::Fixed(_) | OutputType::Computed(_) | OutputType::Table(_) => Vec::new(),
        }
    }

    pub fn resolve(&self, args: &[Arg]) -> Result<ExprType> {
        let dtype = match &self.ty {
            OutputType::TypeOfArg(index) => return Ok(arg_expr(args, *index)?.ty().clone()),
            OutputType::Table(compute) => return compute(args).map(ExprType::Table),
            OutputType::Fixed(dtype) => dtype.clone(),
            OutputType::DtypeOfArg(index) => arg_dtype(args, *index)?.clone(),
            OutputType::HighestPrecedence(positions) => highest_precedence(args, positions)?,
            OutputType::ElementOfArg(index) => {
                let dtype = arg_dtype(args, *index)?;
                match dtype.element_type() {
                    Some(element) => element.clone(),
                    None => return Err(Error::mismatch("array", dtype)),
                }
            }
            OutputType::Computed(compute) => compute(args)?,
        };
        Ok(ExprType::Value {
            dtype,
            shape: self.shape.resolve(args),
        })
    }
}

impl From<OutputType> for Output {
    fn from(ty: OutputType) -> Self {
        ty.like_args()
    }
}

impl From<DataType> for Output {
    fn from(dtype: DataType) -> Self {
        OutputType::Fixed(dtype).like_args()
    }
}

/// Expression argument at `index`.
pub(crate) fn arg_expr(args: &[Arg], index: usize) -> Result<&Expr> {
    match args.get(index) {
        Some(Arg::Expr(expr)) => Ok(expr),
        Some(Arg::Absent) | None => Err(Error::mismatch(
            format!("expression at argument {index}"),
            "nothing",
        )),
        Some(other) => Err(Error::mismatch(
            format!("expression at argument {index}"),
            format!("{other:?}"),
        )),
    }
}

/// Data type carried by the argument at `index`.
pub(crate) fn arg_dtype(args: &[Arg], index: usize) -> Result<&DataType> {
    args.get(index)
        .and_then(Arg::dtype)
        .ok_or_else(|| Error::mismatch(format!("typed argument {index}"), "untyped argument"))
}

fn highest_precedence(args: &[Arg], positions: &[usize]) -> Result<DataType> {
    let mut acc: Option<DataType> = None;
    let exprs = positions
        .iter()
        .filter_map(|index| args.get(*index))
        .flat_map(Arg::exprs);
    for expr in exprs {
        let Some(dtype) = expr.dtype() else {
            continue;
        };
        acc = Some(match acc {
            None => dtype.clone(),
            Some(prev) => match prev.common_supertype(dtype) {
                Some(common) => common,
                None => {
                    return Err(Error::ElementTypeConflict {
                        site: Site::default(),
                        left: prev,
                        right: dtype.clone(),
                    });
                }
            },
        });
    }
    Ok(acc.unwrap_or(DataType::Null))
}
