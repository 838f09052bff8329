//! Result types mirroring backend endpoints and the CAD platform.

use serde::{Deserialize, Serialize};

use crate::path::{ElementPath, InstancePath};

/// Kind of tab the session was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "PARTSTUDIO")]
    PartStudio,
    #[serde(rename = "ASSEMBLY")]
    Assembly,
}

impl ElementType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartStudio => "PARTSTUDIO",
            Self::Assembly => "ASSEMBLY",
        }
    }

    /// Route that inserts a library element into a tab of this kind.
    #[must_use]
    pub fn insert_route(&self) -> &'static str {
        match self {
            Self::PartStudio => "/add-to-part-studio",
            Self::Assembly => "/add-to-assembly",
        }
    }
}

impl std::str::FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PARTSTUDIO" | "PART_STUDIO" => Ok(Self::PartStudio),
            "ASSEMBLY" => Ok(Self::Assembly),
            _ => Err(format!("Invalid element type: {s}")),
        }
    }
}

/// Which default name to ask the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultNameKind {
    Assembly,
    Version,
    PartStudio,
}

impl DefaultNameKind {
    #[must_use]
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Assembly => "assembly",
            Self::Version => "version",
            Self::PartStudio => "part-studio",
        }
    }
}

impl std::str::FromStr for DefaultNameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assembly" => Ok(Self::Assembly),
            "version" => Ok(Self::Version),
            "part-studio" | "partstudio" => Ok(Self::PartStudio),
            _ => Err(format!("Invalid default name kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedElements {
    pub updated_elements: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultName {
    pub name: String,
}

/// Response of `generate-assembly`; only the new tab id matters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAssembly {
    pub element_id: String,
}

/// Body of a push-version request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushVersionBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub instances_to_update: &'a [InstancePath],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    pub documents: Vec<DocumentObj>,
    pub elements: Vec<ElementObj>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentObj {
    pub id: String,
    pub name: String,
    pub element_ids: Vec<String>,
}

/// A library element that can be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementObj {
    #[serde(flatten)]
    pub path: ElementPath,
    pub id: String,
    pub name: String,
    pub element_type: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationResult {
    pub default_configuration: String,
    pub parameters: Vec<ParameterObj>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBase {
    pub id: String,
    pub name: String,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumParameter {
    #[serde(flatten)]
    pub base: ParameterBase,
    pub options: Vec<EnumOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuantityType {
    Length,
    Angle,
    Integer,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Meter,
    Centimeter,
    Millimeter,
    Yard,
    Foot,
    Inch,
    Degree,
    Radian,
    #[serde(rename = "")]
    Unitless,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityParameter {
    #[serde(flatten)]
    pub base: ParameterBase,
    pub quantity_type: QuantityType,
    pub min: f64,
    pub max: f64,
    pub unit: Unit,
}

/// A configuration parameter, tagged by its CAD type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterObj {
    #[serde(rename = "BTMConfigurationParameterEnum-105")]
    Enum(EnumParameter),
    #[serde(rename = "BTMConfigurationParameterQuantity-1826")]
    Quantity(QuantityParameter),
    #[serde(rename = "BTMConfigurationParameterBoolean-2550")]
    Boolean(ParameterBase),
    #[serde(rename = "BTMConfigurationParameterString-872")]
    String(ParameterBase),
}

impl ParameterObj {
    #[must_use]
    pub fn base(&self) -> &ParameterBase {
        match self {
            Self::Enum(p) => &p.base,
            Self::Quantity(p) => &p.base,
            Self::Boolean(p) | Self::String(p) => p,
        }
    }
}

impl ConfigurationResult {
    /// Every parameter set to its default value.
    #[must_use]
    pub fn default_values(&self) -> std::collections::BTreeMap<String, String> {
        self.parameters
            .iter()
            .map(|p| (p.base().id.clone(), p.base().default.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
