//! Custom contact attributes ("contact data").

use super::metadata::MetadataDatatype;
use super::timestamp::{format_timestamp, parse_timestamp};
use crate::error::{MailjetError, MailjetResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The typed value of a custom attribute.
///
/// The variant is chosen by the `Datatype` of the matching metadata field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContactDataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
}

impl ContactDataValue {
    /// Convert a raw Mailjet value into the variant for `datatype`.
    ///
    /// Booleans are `true` only for the literal `"true"`, so an empty bool is
    /// `false`. For every other datatype an empty raw value is kept as an
    /// empty string, since Mailjet reports cleared attributes that way.
    ///
    /// # Errors
    ///
    /// Returns `MailjetError::InvalidContactData` if a non-empty value does not
    /// parse as an `int`, `float` or `datetime`.
    pub fn parse(name: &str, raw: &str, datatype: MetadataDatatype) -> MailjetResult<Self> {
        let invalid = || {
            MailjetError::InvalidContactData(format!(
                "Value {:?} of {} is not a valid {}",
                raw, name, datatype
            ))
        };

        match datatype {
            MetadataDatatype::Bool => Ok(Self::Boolean(raw == "true")),
            _ if raw.is_empty() => Ok(Self::String(String::new())),
            MetadataDatatype::Str => Ok(Self::String(raw.to_string())),
            MetadataDatatype::Int => raw.trim().parse().map(Self::Integer).map_err(|_| invalid()),
            MetadataDatatype::Float => raw.trim().parse().map(Self::Float).map_err(|_| invalid()),
            MetadataDatatype::DateTime => parse_timestamp(raw).map(Self::DateTime).ok_or_else(invalid),
        }
    }

    /// Render the value the way the `contactdata` resource expects it.
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Boolean(true) => "true".to_string(),
            Self::Boolean(false) => "false".to_string(),
            Self::DateTime(value) => format_timestamp(value),
        }
    }
}

impl fmt::Display for ContactDataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl From<String> for ContactDataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ContactDataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for ContactDataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ContactDataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ContactDataValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for ContactDataValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// One named custom attribute on a contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactData {
    /// Name of the metadata field this value belongs to
    pub name: String,

    pub value: ContactDataValue,
}

impl ContactData {
    pub fn new(name: impl Into<String>, value: impl Into<ContactDataValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Wire entry for `PUT /contactdata/{id}`.
    pub fn to_entry(&self) -> ContactDataEntry {
        ContactDataEntry {
            name: self.name.clone(),
            value: self.value.to_wire_string(),
        }
    }
}

/// A `{Name, Value}` pair as exchanged with the `contactdata` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDataEntry {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Value", deserialize_with = "deserialize_value_as_string")]
    pub value: String,
}

/// Mailjet sends values as strings, but tolerate bare numbers and booleans.
fn deserialize_value_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A record of the `contactdata` resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContactDataRecord {
    #[serde(rename = "ContactID", default)]
    pub contact_id: i64,

    #[serde(rename = "Data", default)]
    pub data: Vec<ContactDataEntry>,
}

/// Body for `PUT /contactdata/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateContactDataRequest {
    #[serde(rename = "Data")]
    pub data: Vec<ContactDataEntry>,
}

impl UpdateContactDataRequest {
    pub fn from_contact_data(contact_data: &[ContactData]) -> Self {
        Self {
            data: contact_data.iter().map(ContactData::to_entry).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_bool_wire_literals() {
        assert_eq!(ContactDataValue::Boolean(true).to_wire_string(), "true");
        assert_eq!(ContactDataValue::Boolean(false).to_wire_string(), "false");
    }

    #[test]
    fn test_datetime_wire_format() {
        let value = ContactDataValue::from(Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(value.to_wire_string(), "2021-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_scalar_wire_format() {
        assert_eq!(ContactDataValue::from(42_i64).to_wire_string(), "42");
        assert_eq!(ContactDataValue::from(2.5_f64).to_wire_string(), "2.5");
        assert_eq!(ContactDataValue::from("Berlin").to_wire_string(), "Berlin");
    }

    #[test]
    fn test_parse_by_datatype() {
        assert_eq!(
            ContactDataValue::parse("age", "42", MetadataDatatype::Int).unwrap(),
            ContactDataValue::Integer(42)
        );
        assert_eq!(
            ContactDataValue::parse("score", "0.75", MetadataDatatype::Float).unwrap(),
            ContactDataValue::Float(0.75)
        );
        assert_eq!(
            ContactDataValue::parse("newsletter", "true", MetadataDatatype::Bool).unwrap(),
            ContactDataValue::Boolean(true)
        );
        assert_eq!(
            ContactDataValue::parse("newsletter", "yes", MetadataDatatype::Bool).unwrap(),
            ContactDataValue::Boolean(false)
        );
        assert_eq!(
            ContactDataValue::parse("birthday", "1990-05-17T00:00:00Z", MetadataDatatype::DateTime)
                .unwrap(),
            ContactDataValue::DateTime(Utc.with_ymd_and_hms(1990, 5, 17, 0, 0, 0).unwrap())
        );
        assert_eq!(
            ContactDataValue::parse("city", "Hamburg", MetadataDatatype::Str).unwrap(),
            ContactDataValue::String("Hamburg".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_mismatched_value() {
        let result = ContactDataValue::parse("age", "forty-two", MetadataDatatype::Int);
        assert!(matches!(result, Err(MailjetError::InvalidContactData(_))));

        let result = ContactDataValue::parse("birthday", "someday", MetadataDatatype::DateTime);
        assert!(matches!(result, Err(MailjetError::InvalidContactData(_))));
    }

    #[test]
    fn test_parse_empty_value_stays_string() {
        assert_eq!(
            ContactDataValue::parse("age", "", MetadataDatatype::Int).unwrap(),
            ContactDataValue::String(String::new())
        );
    }

    #[test]
    fn test_parse_empty_bool_is_false() {
        assert_eq!(
            ContactDataValue::parse("newsletter", "", MetadataDatatype::Bool).unwrap(),
            ContactDataValue::Boolean(false)
        );
    }

    #[test]
    fn test_update_request_payload() {
        let data = vec![
            ContactData::new("newsletter", true),
            ContactData::new("unsubscribed", false),
            ContactData::new("age", 42_i64),
        ];
        let body = serde_json::to_value(UpdateContactDataRequest::from_contact_data(&data)).unwrap();

        assert_eq!(
            body,
            json!({"Data": [
                {"Name": "newsletter", "Value": "true"},
                {"Name": "unsubscribed", "Value": "false"},
                {"Name": "age", "Value": "42"}
            ]})
        );
    }

    #[test]
    fn test_entry_tolerates_non_string_values() {
        let entry: ContactDataEntry =
            serde_json::from_value(json!({"Name": "age", "Value": 42})).unwrap();
        assert_eq!(entry.value, "42");

        let entry: ContactDataEntry =
            serde_json::from_value(json!({"Name": "city", "Value": null})).unwrap();
        assert_eq!(entry.value, "");
    }
}
