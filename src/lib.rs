#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod api;
pub mod context;
pub mod errors;
pub mod link;
pub mod logging;
pub mod path;
pub mod user_config;
pub mod utils;
pub mod version;

// Re-export commonly used types
pub use api::{ApiClient, ApiRequest, ApiResponse, HttpTransport, RetryPolicy, Transport};
pub use context::SessionContext;
pub use errors::{
    to_error_json, ApiError, ReportedError, StructuredError, ToStructuredError, TransportError,
    ValidationError,
};
pub use link::{LinkDirection, LinkError, LinkManager, LinkedDocument, Removal, UndoHandle};
pub use path::{
    parse_web_path, parse_web_url, to_element_path, to_instance_path, to_web_url, DocumentPath,
    ElementPath, Identifier, InstancePath, InstanceType, WebLocation,
};
pub use user_config::{load_user_config, UserConfig, UserConfigError};
pub use version::{is_version_name_valid, PushVersionArgs};
