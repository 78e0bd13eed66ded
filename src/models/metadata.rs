//! Contact metadata field definitions (`contactmetadata` resource).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a custom contact attribute.
///
/// Serialized with Mailjet's wire names: `str`, `int`, `float`, `bool`,
/// `datetime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataDatatype {
    Str,
    Int,
    Float,
    Bool,
    #[serde(rename = "datetime")]
    DateTime,
}

impl MetadataDatatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for MetadataDatatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a field keeps a single value (`static`) or a value history (`historic`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataNamespace {
    #[default]
    Static,
    Historic,
}

/// A metadata field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    #[serde(rename = "ID", default)]
    pub id: u64,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "NameSpace", default)]
    pub namespace: MetadataNamespace,

    #[serde(rename = "Datatype")]
    pub datatype: MetadataDatatype,
}

/// Body for `POST /contactmetadata`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMetadataFieldRequest {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "NameSpace")]
    pub namespace: MetadataNamespace,

    #[serde(rename = "Datatype")]
    pub datatype: MetadataDatatype,
}
