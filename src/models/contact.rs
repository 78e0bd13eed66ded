//! Contact model representing a Mailjet contact.

use super::contact_data::ContactData;
use super::timestamp::{parse_optional_timestamp, parse_timestamp};
use crate::domain::{ContactEmail, ContactIdentifier};
use crate::error::MailjetError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact record as returned by the `contact` resource.
///
/// Only the fields the adapter maps are declared; anything else Mailjet sends
/// (`UnsubscribedAt`, `UnsubscribedBy`, ...) is ignored by serde.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawContact {
    #[serde(rename = "ID")]
    pub id: i64,

    #[serde(rename = "Email")]
    pub email: String,

    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "DeliveredCount", default)]
    pub delivered_count: u64,

    #[serde(rename = "IsOptInPending", default)]
    pub is_opt_in_pending: bool,

    #[serde(rename = "LastActivityAt", default)]
    pub last_activity_at: Option<String>,

    #[serde(rename = "LastUpdateAt", default)]
    pub last_update_at: Option<String>,

    #[serde(rename = "IsSpamComplaining", default)]
    pub is_spam_complaining: bool,

    #[serde(rename = "ExclusionFromCampaignsUpdatedAt", default)]
    pub exclusion_from_campaigns_updated_at: Option<String>,

    #[serde(rename = "IsExcludedFromCampaigns", default)]
    pub is_excluded_from_campaigns: bool,
}

/// A Mailjet contact together with its loaded custom data.
///
/// The identifier is fixed at construction; every other field may be changed
/// by the caller or the service layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Contact {
    identifier: ContactIdentifier,

    /// Contact email address
    pub email: ContactEmail,

    /// When the contact was created on Mailjet
    pub created_at: DateTime<Utc>,

    /// Display name (may be empty)
    pub name: String,

    /// Number of messages delivered to this contact
    pub delivered_count: u64,

    /// Double opt-in confirmation still outstanding
    pub is_opt_in_pending: bool,

    pub last_activity_at: Option<DateTime<Utc>>,

    pub last_update_at: Option<DateTime<Utc>>,

    /// The contact has reported a message as spam
    pub is_spam_complaining: bool,

    pub exclusion_from_campaigns_updated_at: Option<DateTime<Utc>>,

    /// Excluded from all marketing campaigns
    pub is_excluded_from_campaigns: bool,

    /// Custom attributes; empty unless they were requested on fetch
    pub contact_data: Vec<ContactData>,
}

impl Contact {
    /// Create a contact with default counters and flags.
    pub fn new(identifier: ContactIdentifier, email: ContactEmail, created_at: DateTime<Utc>) -> Self {
        Self {
            identifier,
            email,
            created_at,
            name: String::new(),
            delivered_count: 0,
            is_opt_in_pending: false,
            last_activity_at: None,
            last_update_at: None,
            is_spam_complaining: false,
            exclusion_from_campaigns_updated_at: None,
            is_excluded_from_campaigns: false,
            contact_data: Vec::new(),
        }
    }

    pub fn identifier(&self) -> ContactIdentifier {
        self.identifier
    }

    /// Replace the custom data wholesale.
    pub fn set_contact_data(&mut self, contact_data: Vec<ContactData>) {
        self.contact_data = contact_data;
    }

    /// Look up a custom attribute by name.
    pub fn contact_data_by_name(&self, name: &str) -> Option<&ContactData> {
        self.contact_data.iter().find(|data| data.name == name)
    }
}

impl TryFrom<RawContact> for Contact {
    type Error = MailjetError;

    fn try_from(raw: RawContact) -> Result<Self, Self::Error> {
        let identifier = ContactIdentifier::new(raw.id)?;
        let email = ContactEmail::new(raw.email)?;

        let created_at = match raw.created_at.as_deref() {
            Some(value) => parse_timestamp(value).ok_or_else(|| {
                MailjetError::InvalidContactData(format!(
                    "Contact {} has an unparseable CreatedAt: {:?}",
                    identifier, value
                ))
            })?,
            None => {
                return Err(MailjetError::InvalidContactData(format!(
                    "Contact {} is missing CreatedAt",
                    identifier
                )))
            }
        };

        Ok(Self {
            identifier,
            email,
            created_at,
            name: raw.name,
            delivered_count: raw.delivered_count,
            is_opt_in_pending: raw.is_opt_in_pending,
            last_activity_at: parse_optional_timestamp(raw.last_activity_at.as_deref()),
            last_update_at: parse_optional_timestamp(raw.last_update_at.as_deref()),
            is_spam_complaining: raw.is_spam_complaining,
            exclusion_from_campaigns_updated_at: parse_optional_timestamp(
                raw.exclusion_from_campaigns_updated_at.as_deref(),
            ),
            is_excluded_from_campaigns: raw.is_excluded_from_campaigns,
            contact_data: Vec::new(),
        })
    }
}

/// Body for `POST /contact`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContactRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
}

/// Body for `PUT /contact/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateContactNameRequest {
    #[serde(rename = "Name")]
    pub name: String,
}
