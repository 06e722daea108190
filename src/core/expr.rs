//! Rapids expression builder
//!
//! Steps describe their work as Rapids expressions evaluated against a
//! placeholder frame; the server substitutes the real frame at fit time.

use std::fmt;

/// Id of the placeholder frame used in step expressions
pub const DUMMY_FRAME: &str = "dummy";

/// A Rapids expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Function application: `(op arg...)`
    Call(String, Vec<Expr>),
    /// Frame reference by key
    Frame(String),
    Str(String),
    Num(f64),
    List(Vec<Expr>),
}

impl Expr {
    pub fn call(op: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(op.into(), args)
    }

    /// Columns of the placeholder frame: `(cols_py dummy ...)`
    pub fn dummy_cols(cols: &[String]) -> Self {
        let selector = match cols {
            [single] => Expr::Str(single.clone()),
            many => Expr::List(many.iter().cloned().map(Expr::Str).collect()),
        };
        Expr::call("cols_py", vec![Expr::Frame(DUMMY_FRAME.to_string()), selector])
    }

    /// Single column of the placeholder frame
    pub fn dummy_col(col: &str) -> Self {
        Self::dummy_cols(&[col.to_string()])
    }

    /// Assign the value of `expr` to a temporary key: `(tmp= key expr)`
    pub fn assign_tmp(key: impl Into<String>, expr: Expr) -> Self {
        Expr::call("tmp=", vec![Expr::Frame(key.into()), expr])
    }
}

fn write_num(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Inf" } else { "-Inf" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Call(op, args) => {
                write!(f, "({}", op)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Frame(key) => f.write_str(key),
            Expr::Str(s) => write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
            Expr::Num(n) => write_num(f, *n),
            Expr::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_cols() {
        let cols = vec!["sepal_len".to_string(), "class".to_string()];
        assert_eq!(
            Expr::dummy_cols(&cols).to_string(),
            r#"(cols_py dummy ["sepal_len" "class"])"#
        );
        assert_eq!(
            Expr::dummy_col("class").to_string(),
            r#"(cols_py dummy "class")"#
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Expr::Num(3.0).to_string(), "3");
        assert_eq!(Expr::Num(-0.25).to_string(), "-0.25");
        assert_eq!(Expr::Num(f64::NAN).to_string(), "NaN");
        assert_eq!(Expr::Num(f64::NEG_INFINITY).to_string(), "-Inf");
    }

    #[test]
    fn test_nested_call_with_escaping() {
        let expr = Expr::call(
            "countmatches",
            vec![Expr::dummy_col("class"), Expr::Str(r#"a"b"#.to_string()), Expr::Num(2.0)],
        );
        assert_eq!(
            expr.to_string(),
            r#"(countmatches (cols_py dummy "class") "a\"b" 2)"#
        );
    }

    #[test]
    fn test_assign_tmp() {
        let expr = Expr::assign_tmp(
            "res_1",
            Expr::call("+", vec![Expr::Frame("a.hex".into()), Expr::Frame("b.hex".into())]),
        );
        assert_eq!(expr.to_string(), "(tmp= res_1 (+ a.hex b.hex))");
    }
}
