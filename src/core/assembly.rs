//! Assembly domain model: an ordered list of steps fitted on the server

use crate::client::{ApiRequest, ClientError, H2oConnection};
use crate::core::error::AssemblyError;
use crate::core::frame::{ElementwiseOp, Frame, KeyRef};
use crate::core::step::Step;
use serde::Deserialize;
use tracing::{debug, info};

/// A sequence of frame munging steps
///
/// Steps are only described locally. `fit` ships them to the server, which
/// applies them to a frame and keeps the assembly under a new key so it can
/// later be exported as a POJO.
#[derive(Debug)]
pub struct Assembly {
    /// Server-side key, set once the server accepts the steps in `fit`
    id: Option<String>,

    /// Steps in application order
    pub steps: Vec<Step>,

    /// Columns of the frame the assembly was last fitted on
    pub in_colnames: Option<Vec<String>>,

    /// Columns of the last fit result
    pub out_colnames: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FitResponse {
    assembly: KeyRef,
    result: KeyRef,
}

impl Assembly {
    /// Create an assembly from its steps
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        Self {
            id: None,
            steps: steps.into_iter().map(Into::into).collect(),
            in_colnames: None,
            out_colnames: None,
        }
    }

    /// Bind to an assembly that was already fitted on the server
    pub fn attach(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            steps: Vec::new(),
            in_colnames: None,
            out_colnames: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Names of all steps but the last
    pub fn names(&self) -> Vec<&str> {
        let n = self.steps.len().saturating_sub(1);
        self.steps[..n].iter().map(|s| s.name.as_str()).collect()
    }

    /// The JSON array literal sent as the `steps` form parameter
    ///
    /// Double quotes inside a descriptor become single quotes so each one
    /// can be wrapped in double quotes as-is.
    pub fn steps_payload(&self) -> String {
        let quoted: Vec<String> = self
            .steps
            .iter()
            .map(|step| format!("\"{}\"", step.to_rest().replace('"', "'")))
            .collect();
        format!("[{}]", quoted.join(","))
    }

    /// Apply the steps to `frame` on the server and return the result frame
    ///
    /// The assembly id is kept as soon as the server accepts the steps, so
    /// the assembly can still be exported when fetching the result frame
    /// fails. The column caches are only filled on full success.
    pub async fn fit(&mut self, conn: &H2oConnection, frame: &Frame) -> Result<Frame, AssemblyError> {
        let payload = self.steps_payload();
        info!(
            "Fitting assembly with {} steps on frame {}",
            self.steps.len(),
            frame.frame_id
        );
        debug!("Assembly steps: {}", payload);

        let response: FitResponse = conn
            .api(
                ApiRequest::parse("POST /99/Assembly")?
                    .param("steps", payload)
                    .param("frame", frame.frame_id.clone()),
            )
            .await?;
        self.id = Some(response.assembly.name.clone());

        let result = Frame::get(conn, &response.result.name).await?;

        info!(
            "Assembly {} fitted, result frame {}",
            response.assembly.name, result.frame_id
        );
        self.in_colnames = Some(frame.columns.clone());
        self.out_colnames = Some(result.columns.clone());

        Ok(result)
    }

    pub async fn divide(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::Divide, right).await
    }

    pub async fn plus(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::Plus, right).await
    }

    pub async fn multiply(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::Multiply, right).await
    }

    pub async fn minus(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::Minus, right).await
    }

    pub async fn less_than(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::LessThan, right).await
    }

    pub async fn less_than_equal(
        conn: &H2oConnection,
        left: &Frame,
        right: &Frame,
    ) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::LessThanEqual, right).await
    }

    pub async fn equal_equal(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::EqualEqual, right).await
    }

    pub async fn not_equal(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::NotEqual, right).await
    }

    pub async fn greater_than(conn: &H2oConnection, left: &Frame, right: &Frame) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::GreaterThan, right).await
    }

    pub async fn greater_than_equal(
        conn: &H2oConnection,
        left: &Frame,
        right: &Frame,
    ) -> Result<Frame, ClientError> {
        left.elementwise(conn, ElementwiseOp::GreaterThanEqual, right).await
    }
}
