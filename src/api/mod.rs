//! Backend API client.
//!
//! [`ApiClient`] sends [`ApiRequest`]s through a [`Transport`], retries reads
//! according to a [`RetryPolicy`], and turns failed responses into typed
//! errors. The typed operations live in `endpoints`.

mod client;
mod endpoints;
mod retry;
mod transport;
mod types;

pub use client::ApiClient;
pub use endpoints::LinkedDocumentsResponse;
pub use retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY, DEFAULT_MAX_FAILURES};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use types::{
    ConfigurationResult, DefaultName, DefaultNameKind, DocumentObj, DocumentResult, ElementObj,
    ElementType, EnumOption, EnumParameter, GeneratedAssembly, ParameterBase, ParameterObj,
    PushVersionBody, QuantityParameter, QuantityType, Unit, UpdatedElements,
};
