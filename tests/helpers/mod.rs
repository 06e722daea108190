//! Test utilities: a mock H2O transport with canned replies
#![allow(dead_code)]

use async_trait::async_trait;
use h2o_assembly::client::{ApiRequest, ClientError, H2oConnection, H2oTransport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A canned server reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this body
    Body(Vec<u8>),
    /// Non-2xx status with this body
    Status(u16, String),
}

impl MockReply {
    pub fn json(value: Value) -> Self {
        MockReply::Body(value.to_string().into_bytes())
    }

    pub fn text(text: &str) -> Self {
        MockReply::Body(text.as_bytes().to_vec())
    }

    pub fn bytes(bytes: &[u8]) -> Self {
        MockReply::Body(bytes.to_vec())
    }

    pub fn error(status: u16, body: Value) -> Self {
        MockReply::Status(status, body.to_string())
    }
}

/// Requests seen by a `MockTransport`, shared with the test
pub type RequestLog = Arc<Mutex<Vec<ApiRequest>>>;

/// Mock transport that answers requests in order with predefined replies
///
/// Every request is recorded so tests can assert on endpoints and form
/// parameters after the call.
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: RequestLog,
}

impl MockTransport {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_log(&self) -> RequestLog {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl H2oTransport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>, ClientError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Body(body)) => Ok(body),
            Some(MockReply::Status(status, body)) => Err(ClientError::from_response(
                &request.to_string(),
                status,
                body.as_bytes(),
            )),
            None => Err(ClientError::Server {
                endpoint: request.to_string(),
                status: 599,
                message: format!("MockTransport: no reply available for {}", request),
            }),
        }
    }

    fn base_url(&self) -> &str {
        "http://mock-h2o:54321"
    }
}

/// Connection backed by a mock transport, plus its request log
pub fn mock_connection(replies: Vec<MockReply>) -> (H2oConnection, RequestLog) {
    let transport = MockTransport::new(replies);
    let log = transport.request_log();
    (H2oConnection::with_transport(transport), log)
}

/// Snapshot of the recorded requests
pub fn requests(log: &RequestLog) -> Vec<ApiRequest> {
    log.lock().unwrap().clone()
}

/// `GET /3/Frames/<id>` reply
pub fn frame_json(frame_id: &str, rows: u64, columns: &[&str]) -> Value {
    let columns: Vec<Value> = columns
        .iter()
        .map(|label| json!({ "label": label, "type": "real" }))
        .collect();
    json!({
        "frames": [{
            "frame_id": { "name": frame_id, "type": "Key<Frame>" },
            "rows": rows,
            "num_columns": columns.len(),
            "columns": columns,
        }]
    })
}

/// `POST /99/Assembly` reply
pub fn assembly_json(assembly_id: &str, result_id: &str) -> Value {
    json!({
        "__meta": { "schema_type": "Assembly" },
        "assembly": { "name": assembly_id },
        "result": { "name": result_id },
    })
}

/// `POST /4/sessions` reply
pub fn session_json(session_key: &str) -> Value {
    json!({ "session_key": session_key })
}

/// A local `Frame` handle without going through the server
pub fn local_frame(frame_id: &str, columns: &[&str]) -> h2o_assembly::Frame {
    h2o_assembly::Frame {
        frame_id: frame_id.to_string(),
        rows: 150,
        columns: columns.iter().map(|c| c.to_string()).collect(),
        types: columns.iter().map(|_| "real".to_string()).collect(),
    }
}

pub const IRIS_COLUMNS: [&str; 5] = ["sepal_len", "sepal_wid", "petal_len", "petal_wid", "class"];
