use std::fmt::Write;

use super::{Arg, Expr};

/// Renders an expression as an indented tree.
///
/// Each op prints as `Name -> type`, followed by one line per argument
/// labelled with its descriptor name. Literals print inline as
/// `value::type`.
pub struct ExprPrinter<'e> {
    expr: &'e Expr,
    types: bool,
    absent: bool,
}

impl<'e> ExprPrinter<'e> {
    pub fn new(expr: &'e Expr) -> Self {
        Self {
            expr,
            types: true,
            absent: false,
        }
    }

    pub fn with_types(mut self, value: bool) -> Self {
        self.types = value;
        self
    }

    /// Also print optional arguments that were not supplied.
    pub fn with_absent(mut self, value: bool) -> Self {
        self.absent = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_expr(self.expr, 0, w)
    }

    fn format_expr(&self, expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        if expr.is_literal() {
            writeln!(w, "{prefix}{}", self.inline(expr))?;
            return Ok(());
        }

        write!(w, "{prefix}{}", expr.name())?;
        if self.types {
            write!(w, " -> {}", expr.ty())?;
        }
        writeln!(w)?;

        let specs = expr.op().def().signature().iter();
        for (spec, arg) in specs.zip(expr.op().args()) {
            self.format_arg(spec.name(), arg, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_arg(
        &self,
        label: &str,
        arg: &Arg,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match arg {
            Arg::Absent if !self.absent => Ok(()),
            Arg::Absent => writeln!(w, "{prefix}{label}: -"),
            Arg::Expr(expr) if expr.is_literal() => {
                writeln!(w, "{prefix}{label}: {}", self.inline(expr))
            }
            Arg::Expr(expr) => {
                writeln!(w, "{prefix}{label}:")?;
                self.format_expr(expr, indent + 1, w)
            }
            Arg::List(items) => {
                writeln!(w, "{prefix}{label}:")?;
                for (i, item) in items.iter().enumerate() {
                    self.format_arg(&format!("[{i}]"), item, indent + 1, w)?;
                }
                Ok(())
            }
            Arg::Value(value) => writeln!(w, "{prefix}{label}: {value}"),
            Arg::Member(member) => writeln!(w, "{prefix}{label}: {member}"),
            Arg::Str(s) => writeln!(w, "{prefix}{label}: {s:?}"),
            Arg::DataType(dtype) => writeln!(w, "{prefix}{label}: {dtype}"),
            Arg::Schema(schema) => writeln!(w, "{prefix}{label}: {schema}"),
        }
    }

    fn inline(&self, literal: &Expr) -> String {
        let value = literal
            .literal_value()
            .map_or_else(|| "?".to_owned(), ToString::to_string);
        if self.types {
            format!("{value}::{}", literal.ty())
        } else {
            value
        }
    }
}
