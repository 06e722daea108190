//! Built-in column transformers

use crate::core::expr::Expr;
use crate::core::frame::ElementwiseOp;
use crate::core::step::{rest_descriptor, ColumnRef, Transformer};
use serde::{Deserialize, Serialize};

/// Keep only the listed columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColSelect {
    pub cols: Vec<String>,
}

impl ColSelect {
    pub fn new<I, S>(cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cols: cols.into_iter().map(Into::into).collect(),
        }
    }
}

impl Transformer for ColSelect {
    fn to_rest(&self, step_name: &str) -> String {
        let ast = Expr::dummy_cols(&self.cols).to_string();
        rest_descriptor(step_name, "H2OColSelect", &ast, false, &[])
    }
}

/// Literal argument or column reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Column(ColumnRef),
    Number(f64),
    Text(String),
}

impl Operand {
    pub fn to_expr(&self) -> Expr {
        match self {
            Operand::Column(c) => Expr::dummy_col(&c.col),
            Operand::Number(n) => Expr::Num(*n),
            Operand::Text(s) => Expr::Str(s.clone()),
        }
    }
}

impl From<ColumnRef> for Operand {
    fn from(c: ColumnRef) -> Self {
        Operand::Column(c)
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

/// Apply a column function, e.g. `cos` or `countmatches`
#[derive(Debug, Clone, PartialEq)]
pub struct ColOp {
    /// Rapids function name
    pub op: String,
    pub col: String,
    /// Extra arguments after the column
    pub args: Vec<Operand>,
    /// Replace the source column instead of appending a new one
    pub inplace: bool,
    pub new_col_names: Vec<String>,
}

impl ColOp {
    pub fn new(op: impl Into<String>, col: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            col: col.into(),
            args: Vec::new(),
            inplace: false,
            new_col_names: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<Operand>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn inplace(mut self, inplace: bool) -> Self {
        self.inplace = inplace;
        self
    }

    pub fn new_col_name(mut self, name: impl Into<String>) -> Self {
        self.new_col_names.push(name.into());
        self
    }

    fn ast(&self) -> Expr {
        let mut args = vec![Expr::dummy_col(&self.col)];
        args.extend(self.args.iter().map(Operand::to_expr));
        Expr::call(self.op.clone(), args)
    }
}

impl Transformer for ColOp {
    fn to_rest(&self, step_name: &str) -> String {
        rest_descriptor(
            step_name,
            "H2OColOp",
            &self.ast().to_string(),
            self.inplace,
            &self.new_col_names,
        )
    }
}

/// Which side of the operator the non-column operand sits on
#[derive(Debug, Clone, PartialEq)]
pub enum OperandSide {
    /// `operand op col`
    Left(Operand),
    /// `col op operand`
    Right(Operand),
}

/// Elementwise operator between a column and another column or a literal
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub op: ElementwiseOp,
    pub col: String,
    pub operand: OperandSide,
    pub inplace: bool,
    pub new_col_names: Vec<String>,
}

impl BinaryOp {
    pub fn new(op: ElementwiseOp, col: impl Into<String>, operand: OperandSide) -> Self {
        Self {
            op,
            col: col.into(),
            operand,
            inplace: false,
            new_col_names: Vec::new(),
        }
    }

    /// `col op right`
    pub fn right(op: ElementwiseOp, col: impl Into<String>, right: impl Into<Operand>) -> Self {
        Self::new(op, col, OperandSide::Right(right.into()))
    }

    /// `left op col`
    pub fn left(op: ElementwiseOp, col: impl Into<String>, left: impl Into<Operand>) -> Self {
        Self::new(op, col, OperandSide::Left(left.into()))
    }

    pub fn inplace(mut self, inplace: bool) -> Self {
        self.inplace = inplace;
        self
    }

    pub fn new_col_name(mut self, name: impl Into<String>) -> Self {
        self.new_col_names.push(name.into());
        self
    }

    fn ast(&self) -> Expr {
        let col = Expr::dummy_col(&self.col);
        let args = match &self.operand {
            OperandSide::Left(left) => vec![left.to_expr(), col],
            OperandSide::Right(right) => vec![col, right.to_expr()],
        };
        Expr::call(self.op.symbol(), args)
    }
}

impl Transformer for BinaryOp {
    fn to_rest(&self, step_name: &str) -> String {
        rest_descriptor(
            step_name,
            "H2OBinaryOp",
            &self.ast().to_string(),
            self.inplace,
            &self.new_col_names,
        )
    }
}
