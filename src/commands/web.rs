use clap::Subcommand;
use doclink::path::{parse_web_path, parse_web_url, to_web_url, Identifier, WebLocation};
use serde_json::{json, Value};

use super::{write_json, CommandError, ContextArgs, Settings};

#[derive(Subcommand, Debug)]
pub enum UrlCommand {
    /// Print the identifier and API path behind a web URL
    Parse { url: String },
    /// Print the web URL of the current context
    Format {
        /// Configuration to open the element in
        #[arg(long)]
        configuration: Option<String>,
    },
}

pub fn run(command: UrlCommand, context: &ContextArgs, settings: &Settings) -> Result<(), CommandError> {
    match command {
        UrlCommand::Parse { url } => {
            let parsed = match parse_web_url(&settings.cad_host, &url) {
                Some(location) => describe(
                    &Identifier::Element(location.element),
                    location.configuration.as_deref(),
                ),
                None => {
                    let identifier =
                        parse_web_path(&settings.cad_host, &url).ok_or(CommandError::InvalidUrl)?;
                    describe(&identifier, None)
                }
            };
            write_json(&parsed)
        }
        UrlCommand::Format { configuration } => {
            let url = match (context.identifier(&settings.cad_host)?, configuration) {
                (Identifier::Element(element), configuration) => WebLocation {
                    element,
                    configuration,
                }
                .to_web_url(&settings.cad_host),
                (identifier, None) => to_web_url(&settings.cad_host, &identifier),
                (_, Some(_)) => {
                    return Err(CommandError::InvalidArgument(
                        "A configuration needs an element id".to_string(),
                    ))
                }
            };
            write_json(&json!({ "url": url }))
        }
    }
}

fn describe(identifier: &Identifier, configuration: Option<&str>) -> Value {
    let kind = match identifier {
        Identifier::Document(_) => "document",
        Identifier::Instance(_) => "instance",
        Identifier::Element(_) => "element",
    };
    let mut value = json!({
        "kind": kind,
        "documentId": identifier.document_id(),
        "apiPath": identifier.api_path(),
    });
    if let Some(object) = value.as_object_mut() {
        if let Some(instance) = identifier.instance() {
            object.insert("instanceId".into(), json!(instance.instance_id));
            object.insert("instanceType".into(), json!(instance.instance_type));
        }
        if let Identifier::Element(element) = identifier {
            object.insert("elementId".into(), json!(element.element_id));
        }
        if let Some(configuration) = configuration {
            object.insert("configuration".into(), json!(configuration));
        }
    }
    value
}
