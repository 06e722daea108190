//! Remote frame handle and elementwise operators

use crate::client::{ApiRequest, ClientError, H2oConnection};
use crate::core::expr::Expr;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Handle to a dataset that lives on the server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Server-side key
    pub frame_id: String,

    pub rows: u64,

    /// Column labels in order
    pub columns: Vec<String>,

    /// Column types as reported by the server (`real`, `int`, `enum`, `string`, ...)
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FramesResponse {
    frames: Vec<FrameSchema>,
}

#[derive(Debug, Deserialize)]
struct FrameSchema {
    frame_id: KeyRef,
    #[serde(default)]
    rows: u64,
    #[serde(default)]
    columns: Vec<ColumnSchema>,
}

#[derive(Debug, Deserialize)]
struct ColumnSchema {
    label: String,
    #[serde(rename = "type", default)]
    column_type: String,
}

/// `{"name": ...}` key reference used throughout the H2O schemas
#[derive(Debug, Clone, Deserialize)]
pub struct KeyRef {
    pub name: String,
}

impl Frame {
    /// Fetch the metadata of an existing frame
    pub async fn get(conn: &H2oConnection, frame_id: &str) -> Result<Frame, ClientError> {
        let request = ApiRequest::parse("GET /3/Frames")?.segment(frame_id);
        let endpoint = request.to_string();
        let response: FramesResponse = conn.api(request).await?;

        let schema = response.frames.into_iter().next().ok_or_else(|| {
            ClientError::Server {
                endpoint,
                status: 404,
                message: format!("frame '{}' not found", frame_id),
            }
        })?;

        let (columns, types) = schema
            .columns
            .into_iter()
            .map(|c| (c.label, c.column_type))
            .unzip();

        Ok(Frame {
            frame_id: schema.frame_id.name,
            rows: schema.rows,
            columns,
            types,
        })
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Apply `op` cell by cell between this frame and `other` on the server
    ///
    /// Both frames must have the same shape and column types; the server
    /// rejects the expression otherwise.
    pub async fn elementwise(
        &self,
        conn: &H2oConnection,
        op: ElementwiseOp,
        other: &Frame,
    ) -> Result<Frame, ClientError> {
        let session_id = conn.session_id().await?;
        let dest = format!("assembly_op_{}", Uuid::new_v4().simple());
        let ast = Expr::assign_tmp(
            dest.clone(),
            Expr::call(
                op.symbol(),
                vec![
                    Expr::Frame(self.frame_id.clone()),
                    Expr::Frame(other.frame_id.clone()),
                ],
            ),
        );

        debug!("Rapids: {}", ast);
        conn.api::<serde_json::Value>(
            ApiRequest::parse("POST /99/Rapids")?
                .param("ast", ast.to_string())
                .param("session_id", session_id),
        )
        .await?;

        info!(
            "{} {} {} -> {}",
            self.frame_id,
            op.symbol(),
            other.frame_id,
            dest
        );
        Frame::get(conn, &dest).await
    }
}

/// Elementwise arithmetic and comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementwiseOp {
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanEqual,
    #[serde(rename = "==")]
    EqualEqual,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanEqual,
}

impl ElementwiseOp {
    pub const ALL: [ElementwiseOp; 10] = [
        ElementwiseOp::Divide,
        ElementwiseOp::Plus,
        ElementwiseOp::Multiply,
        ElementwiseOp::Minus,
        ElementwiseOp::LessThan,
        ElementwiseOp::LessThanEqual,
        ElementwiseOp::EqualEqual,
        ElementwiseOp::NotEqual,
        ElementwiseOp::GreaterThan,
        ElementwiseOp::GreaterThanEqual,
    ];

    /// Rapids operator symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            ElementwiseOp::Divide => "/",
            ElementwiseOp::Plus => "+",
            ElementwiseOp::Multiply => "*",
            ElementwiseOp::Minus => "-",
            ElementwiseOp::LessThan => "<",
            ElementwiseOp::LessThanEqual => "<=",
            ElementwiseOp::EqualEqual => "==",
            ElementwiseOp::NotEqual => "!=",
            ElementwiseOp::GreaterThan => ">",
            ElementwiseOp::GreaterThanEqual => ">=",
        }
    }

    /// Name of the matching `Assembly` alias
    pub fn name(&self) -> &'static str {
        match self {
            ElementwiseOp::Divide => "divide",
            ElementwiseOp::Plus => "plus",
            ElementwiseOp::Multiply => "multiply",
            ElementwiseOp::Minus => "minus",
            ElementwiseOp::LessThan => "less_than",
            ElementwiseOp::LessThanEqual => "less_than_equal",
            ElementwiseOp::EqualEqual => "equal_equal",
            ElementwiseOp::NotEqual => "not_equal",
            ElementwiseOp::GreaterThan => "greater_than",
            ElementwiseOp::GreaterThanEqual => "greater_than_equal",
        }
    }
}

impl fmt::Display for ElementwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for ElementwiseOp {
    type Err = String;

    /// Accepts either the symbol (`>=`) or the alias name (`greater_than_equal`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ElementwiseOp::ALL
            .into_iter()
            .find(|op| op.symbol() == s || op.name() == s)
            .ok_or_else(|| format!("Unknown elementwise operator: {}", s))
    }
}
