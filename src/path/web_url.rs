use super::{DocumentPath, ElementPath, Identifier, InstancePath, InstanceType};
use url::{form_urlencoded, Url};

/// Host serving the CAD web client.
pub const DEFAULT_CAD_HOST: &str = "cad.onshape.com";

const CONFIGURATION_PARAM: &str = "configuration";

/// An element parsed from a web URL, with the configuration it was opened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebLocation {
    pub element: ElementPath,
    pub configuration: Option<String>,
}

impl WebLocation {
    #[must_use]
    pub fn to_web_url(&self, host: &str) -> String {
        let mut url = to_web_url(host, &Identifier::Element(self.element.clone()));
        if let Some(configuration) = &self.configuration {
            let encoded: String = form_urlencoded::byte_serialize(configuration.as_bytes()).collect();
            url.push('?');
            url.push_str(CONFIGURATION_PARAM);
            url.push('=');
            url.push_str(&encoded);
        }
        url
    }
}

/// Builds `https://{host}/documents/{d}[/{wvm}/{i}][/e/{e}]`.
#[must_use]
pub fn to_web_url(host: &str, id: &Identifier) -> String {
    let mut url = format!("https://{host}/documents/{}", id.document_id());
    if let Some(instance) = id.instance() {
        url.push('/');
        url.push_str(instance.instance_type.as_code());
        url.push('/');
        url.push_str(&instance.instance_id);
    }
    if let Identifier::Element(element) = id {
        url.push_str("/e/");
        url.push_str(&element.element_id);
    }
    url
}

/// Parses a full element URL. Returns `None` for anything else.
#[must_use]
pub fn parse_web_url(host: &str, input: &str) -> Option<WebLocation> {
    let url = parse_on_host(host, input)?;
    let segments = path_segments(&url)?;
    let element = match segments.as_slice() {
        ["documents", d, wvm, i, "e", e] => {
            ElementPath::new(non_empty(d)?, non_empty(i)?, wvm.parse().ok()?, non_empty(e)?)
        }
        _ => return None,
    };
    let configuration = url
        .query_pairs()
        .find(|(key, _)| key == CONFIGURATION_PARAM)
        .map(|(_, value)| value.into_owned());
    Some(WebLocation {
        element,
        configuration,
    })
}

/// Parses a document, instance or element URL into the matching identifier.
#[must_use]
pub fn parse_web_path(host: &str, input: &str) -> Option<Identifier> {
    let url = parse_on_host(host, input)?;
    let segments = path_segments(&url)?;
    match segments.as_slice() {
        ["documents", d] => Some(Identifier::Document(DocumentPath::new(non_empty(d)?))),
        ["documents", d, wvm, i] => Some(Identifier::Instance(InstancePath::new(
            non_empty(d)?,
            non_empty(i)?,
            wvm.parse::<InstanceType>().ok()?,
        ))),
        ["documents", d, wvm, i, "e", e] => Some(Identifier::Element(ElementPath::new(
            non_empty(d)?,
            non_empty(i)?,
            wvm.parse().ok()?,
            non_empty(e)?,
        ))),
        _ => None,
    }
}

fn parse_on_host(host: &str, input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    if url.scheme() != "https" {
        return None;
    }
    let actual = url.host_str()?;
    actual.eq_ignore_ascii_case(host).then_some(url)
}

/// Segments of the URL path, ignoring a single trailing slash.
fn path_segments(url: &Url) -> Option<Vec<&str>> {
    let mut segments: Vec<&str> = url.path_segments()?.collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    Some(segments)
}

fn non_empty<'a>(segment: &&'a str) -> Option<&'a str> {
    Some(*segment).filter(|s| !s.is_empty())
}
