//! Subcommands of the `doclink` binary.
//!
//! Every command prints its result as JSON on stdout. Failures are returned
//! as [`CommandError`] and rendered by `main` as a structured error.

mod assembly;
mod library;
mod links;
mod versions;
mod web;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use doclink::api::{ApiClient, DefaultNameKind, HttpTransport, RetryPolicy};
use doclink::errors::{ApiError, ToStructuredError, TransportError, ValidationError};
use doclink::link::{LinkError, LinkManager};
use doclink::path::{parse_web_path, parse_web_url, Identifier, PathError};
use doclink::SessionContext;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use links::LinksCommand;
pub use web::UrlCommand;

/// The document the command runs against, as the host would pass it.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Current document id
    #[arg(long, env = "DOCLINK_DOCUMENT_ID", global = true)]
    pub document_id: Option<String>,

    /// Current instance (workspace, version or microversion) id
    #[arg(long, env = "DOCLINK_INSTANCE_ID", global = true)]
    pub instance_id: Option<String>,

    /// Current instance type: w, v or m
    #[arg(long, env = "DOCLINK_INSTANCE_TYPE", global = true)]
    pub instance_type: Option<String>,

    /// Current tab id
    #[arg(long, env = "DOCLINK_ELEMENT_ID", global = true)]
    pub element_id: Option<String>,

    /// Kind of the current tab: PARTSTUDIO or ASSEMBLY
    #[arg(long, env = "DOCLINK_ELEMENT_TYPE", global = true)]
    pub element_type: Option<String>,

    /// Web URL of the current document, instead of the id flags
    #[arg(long, env = "DOCLINK_URL", global = true)]
    pub url: Option<String>,
}

impl ContextArgs {
    /// The identifier given by `--url` or by the id flags.
    pub fn identifier(&self, cad_host: &str) -> Result<Identifier, CommandError> {
        if let Some(url) = &self.url {
            if let Some(location) = parse_web_url(cad_host, url) {
                return Ok(Identifier::Element(location.element));
            }
            return parse_web_path(cad_host, url).ok_or(CommandError::InvalidUrl);
        }
        Ok(Identifier::from_fields(
            self.document_id.as_deref(),
            self.instance_id.as_deref(),
            self.instance_type.as_deref(),
            self.element_id.as_deref(),
        )?)
    }

    pub fn session(&self, cad_host: &str) -> Result<SessionContext, CommandError> {
        let mut context = match self.identifier(cad_host)? {
            Identifier::Document(_) => return Err(PathError::MissingInstanceId.into()),
            Identifier::Instance(instance) => SessionContext::new(instance),
            Identifier::Element(element) => SessionContext::from(element),
        };
        if let Some(kind) = self.element_type.as_deref() {
            let kind = kind.parse().map_err(CommandError::InvalidArgument)?;
            context = context.with_element_type(kind);
        }
        Ok(context)
    }
}

/// Settings after merging the config file with flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub cad_host: String,
    pub timeout: Duration,
    pub undo_window: Duration,
    pub retry: RetryPolicy,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List, add or remove linked documents
    Links {
        #[command(subcommand)]
        action: LinksCommand,
    },
    /// Create a version and update every linked parent to it
    PushVersion {
        /// Version name; the backend suggests one when omitted
        #[arg(long)]
        name: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        /// Also update parents of parents
        #[arg(long)]
        recursive: bool,
    },
    /// Update references in this document to the latest child versions
    UpdateReferences {
        /// Web URLs of the children to update; all children when omitted
        #[arg(long = "child")]
        children: Vec<String>,
    },
    /// Generate an assembly from the current part studio
    GenerateAssembly {
        /// Assembly name; the backend suggests one when omitted
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the name the backend suggests for a new assembly, version or part studio
    DefaultName {
        /// assembly, version or part-studio
        kind: DefaultNameKind,
    },
    /// List library documents and elements
    Documents,
    /// Show the configuration parameters of a library element
    Configuration {
        configuration_id: String,
    },
    /// Insert a library element into the current tab
    Insert {
        /// Library element id, as listed by `documents`
        element_id: String,

        /// Configuration overrides as key=value
        #[arg(long = "set", value_parser = parse_key_value)]
        overrides: Vec<(String, String)>,
    },
    /// Convert between web URLs and identifiers
    Url {
        #[command(subcommand)]
        action: UrlCommand,
    },
}

impl Command {
    /// Name used in error reports.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Links { action } => action.operation(),
            Self::PushVersion { .. } => "push_version",
            Self::UpdateReferences { .. } => "update_references",
            Self::GenerateAssembly { .. } => "generate_assembly",
            Self::DefaultName { .. } => "default_name",
            Self::Documents => "list_documents",
            Self::Configuration { .. } => "get_configuration",
            Self::Insert { .. } => "insert_element",
            Self::Url { .. } => "url",
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid document context: {0}")]
    Context(#[from] PathError),
    #[error("Failed to parse the URL. Is it a valid document link?")]
    InvalidUrl,
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToStructuredError for CommandError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            Self::Context(_) => (
                "INVALID_CONTEXT",
                Some("Pass --document-id and --instance-id, or --url"),
            ),
            Self::InvalidUrl => ("INVALID_URL", None),
            Self::InvalidArgument(_) => ("INVALID_ARGUMENT", None),
            Self::ElementNotFound(_) => ("ELEMENT_NOT_FOUND", Some("Run 'doclink documents'")),
            Self::Validation(e) => e.error_code_and_tip(),
            Self::Api(e) => e.error_code_and_tip(),
            Self::Link(e) => e.error_code_and_tip(),
            Self::Transport(e) => e.error_code_and_tip(),
            Self::Io(_) => ("IO_ERROR", None),
            Self::Json(_) => ("ENCODE_ERROR", None),
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("Expected key=value, got: {s}"))
}

/// Pretty-prints `value` on stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let text = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}

fn build_client(settings: &Settings, context: SessionContext) -> Result<ApiClient, CommandError> {
    let transport = HttpTransport::new(&settings.api_url, settings.timeout)?;
    Ok(ApiClient::new(Arc::new(transport), context).with_retry_policy(settings.retry))
}

fn build_manager(settings: &Settings, client: ApiClient) -> LinkManager {
    LinkManager::new(client)
        .with_undo_window(settings.undo_window)
        .with_cad_host(settings.cad_host.clone())
}

/// Runs `command` against the backend described by `settings`.
pub async fn run(
    command: Command,
    context: &ContextArgs,
    settings: &Settings,
    cancel: &CancellationToken,
) -> Result<(), CommandError> {
    let client = || build_client(settings, context.session(&settings.cad_host)?);
    match command {
        Command::Url { action } => web::run(action, context, settings),
        Command::Links { action } => {
            links::run(action, &build_manager(settings, client()?), cancel).await
        }
        Command::PushVersion {
            name,
            description,
            recursive,
        } => {
            versions::push_version(
                &build_manager(settings, client()?),
                name,
                &description,
                recursive,
                cancel,
            )
            .await
        }
        Command::UpdateReferences { children } => {
            versions::update_references(&client()?, settings, &children, cancel).await
        }
        Command::GenerateAssembly { name } => {
            assembly::generate(&client()?, settings, name, cancel).await
        }
        Command::DefaultName { kind } => versions::default_name(&client()?, kind, cancel).await,
        Command::Documents => library::documents(&client()?, cancel).await,
        Command::Configuration { configuration_id } => {
            library::configuration(&client()?, &configuration_id, cancel).await
        }
        Command::Insert {
            element_id,
            overrides,
        } => library::insert(&client()?, &element_id, overrides, cancel).await,
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
