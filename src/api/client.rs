use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::retry::RetryPolicy;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::context::SessionContext;
use crate::errors::{ApiError, ReportedError};

/// Client for the linked-documents backend, bound to one session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    context: SessionContext,
    retry: RetryPolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("context", &self.context)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, context: SessionContext) -> Self {
        Self {
            transport,
            context,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends `request` and decodes the response body as `T`.
    ///
    /// Reads are repeated while the retry policy allows it; mutations are
    /// sent exactly once. Cancelling `cancel` aborts both the request in
    /// flight and any pending backoff.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        let policy = if request.is_idempotent() {
            self.retry
        } else {
            RetryPolicy::never()
        };
        let mut failures: u32 = 0;
        loop {
            match self.attempt(&request, cancel).await {
                Ok(value) => return Ok(value),
                Err(err) if policy.should_retry(failures, &err) => {
                    let delay = policy.delay(failures);
                    warn!(
                        method = %request.method,
                        path = %request.path,
                        failures = failures.saturating_add(1),
                        delay = %humantime::format_duration(delay),
                        error = %err,
                        "Backend request failed, retrying"
                    );
                    failures = failures.saturating_add(1);
                    tokio::select! {
                        () = cancel.cancelled() => return Err(ApiError::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(ApiError::Cancelled),
            result = self.transport.send(request) => result?,
        };
        self.decode(response)
    }

    fn decode<T: DeserializeOwned>(&self, response: ApiResponse) -> Result<T, ApiError> {
        if response.status.is_success() {
            if response.body.iter().all(u8::is_ascii_whitespace) {
                return Ok(serde_json::from_value(serde_json::Value::Null)?);
            }
            return Ok(serde_json::from_slice(&response.body)?);
        }
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
            if let Some(reported) = ReportedError::classify(&value, self.context.document_id()) {
                debug!(status = %response.status, error = %reported, "Backend reported an error");
                return Err(reported.into());
            }
        }
        Err(ApiError::Status {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
    }
}
