//! Common test utilities
#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use doclink::api::{ApiClient, ApiRequest, ApiResponse, RetryPolicy, Transport};
use doclink::errors::TransportError;
use doclink::path::{ElementPath, InstanceType};
use doclink::SessionContext;
use http::StatusCode;
use serde_json::{json, Value};

pub const CURRENT_DOCUMENT: &str = "current-doc";
pub const CURRENT_WORKSPACE: &str = "current-ws";
pub const CURRENT_ELEMENT: &str = "current-tab";
pub const CAD_HOST: &str = "cad.onshape.com";

/// In-memory transport that replays queued responses and records every
/// request it receives. Runs out with a connection error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::json(status, &body)));
    }

    pub fn push_ok(&self, body: Value) {
        self.push_json(200, body);
    }

    pub fn push_connection_error(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Connection("connection refused".into())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one request")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no scripted response".into())))
    }
}

/// Transport whose requests never complete.
#[derive(Default)]
pub struct StalledTransport {
    pub sent: Mutex<usize>,
}

#[async_trait]
impl Transport for StalledTransport {
    async fn send(&self, _request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        *self.sent.lock().unwrap() += 1;
        std::future::pending().await
    }
}

/// Session opened in a part studio of the current workspace.
pub fn session() -> SessionContext {
    SessionContext::from(ElementPath::new(
        CURRENT_DOCUMENT,
        CURRENT_WORKSPACE,
        InstanceType::Workspace,
        CURRENT_ELEMENT,
    ))
}

/// Same backoff shape as the default, in milliseconds.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_failures: 4,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(4),
    }
}

pub fn client(transport: Arc<dyn Transport>) -> ApiClient {
    ApiClient::new(transport, session()).with_retry_policy(fast_retry())
}

pub fn client_with(transport: Arc<dyn Transport>, context: SessionContext) -> ApiClient {
    ApiClient::new(transport, context).with_retry_policy(fast_retry())
}

/// A resolved linked-document record as the backend sends it.
pub fn linked_record(document_id: &str, workspace_id: &str, name: &str) -> Value {
    json!({
        "documentId": document_id,
        "instanceId": workspace_id,
        "instanceType": "w",
        "isOpenable": true,
        "name": name,
        "instanceName": "Main"
    })
}

pub fn query_value<'a>(request: &'a ApiRequest, key: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn web_url(document_id: &str, instance_code: &str, instance_id: &str) -> String {
    format!("https://{CAD_HOST}/documents/{document_id}/{instance_code}/{instance_id}")
}
