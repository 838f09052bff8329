use super::PathError;
use serde::{Deserialize, Serialize};

/// Kind of document instance, encoded on the wire as `w`, `v` or `m`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceType {
    /// An editable workspace.
    #[default]
    #[serde(rename = "w")]
    Workspace,
    /// An immutable named version.
    #[serde(rename = "v")]
    Version,
    /// An entry in the edit history.
    #[serde(rename = "m")]
    Microversion,
}

impl InstanceType {
    #[must_use]
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Workspace => "w",
            Self::Version => "v",
            Self::Microversion => "m",
        }
    }

    #[must_use]
    pub fn is_workspace(&self) -> bool {
        matches!(self, Self::Workspace)
    }
}

impl std::str::FromStr for InstanceType {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Self::Workspace),
            "v" => Ok(Self::Version),
            "m" => Ok(Self::Microversion),
            _ => Err(PathError::UnknownInstanceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}
