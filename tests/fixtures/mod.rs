//! Shared fixtures for the mockito-backed integration tests.

#![allow(dead_code)]

use mailjet_adapter::{ContactService, MailjetClient};
use serde_json::{json, Value};
use std::sync::Arc;

pub const API_KEY: &str = "public";
pub const API_SECRET: &str = "private";

/// `Basic base64("public:private")`
pub const AUTHORIZATION: &str = "Basic cHVibGljOnByaXZhdGU=";

pub fn live_client(base_url: String) -> MailjetClient {
    MailjetClient::with_base_url(base_url, API_KEY, API_SECRET)
}

pub fn live_service(base_url: String) -> ContactService {
    ContactService::new(Arc::new(live_client(base_url)))
}

pub fn sandbox_service(base_url: String) -> ContactService {
    ContactService::new(Arc::new(live_client(base_url).with_live_mode(false)))
}

/// A contact record the way the `contact` resource returns it.
pub fn contact_record(id: i64, email: &str, name: &str) -> Value {
    json!({
        "CreatedAt": "2020-10-01T08:24:56Z",
        "DeliveredCount": 3,
        "Email": email,
        "ExclusionFromCampaignsUpdatedAt": "",
        "ID": id,
        "IsExcludedFromCampaigns": false,
        "IsOptInPending": false,
        "IsSpamComplaining": false,
        "LastActivityAt": "2020-10-05T12:00:00Z",
        "LastUpdateAt": "",
        "Name": name,
        "UnsubscribedAt": "",
        "UnsubscribedBy": ""
    })
}

/// Wrap records in the `{Count, Data, Total}` envelope.
pub fn envelope(records: Vec<Value>) -> String {
    let count = records.len();
    json!({"Count": count, "Data": records, "Total": count}).to_string()
}

pub fn empty_envelope() -> String {
    envelope(Vec::new())
}

pub fn metadata_field(id: u64, name: &str, datatype: &str) -> Value {
    json!({"Datatype": datatype, "ID": id, "Name": name, "NameSpace": "static"})
}

/// The metadata listing used by most contact data tests.
pub fn metadata_listing() -> String {
    envelope(vec![
        metadata_field(1, "age", "int"),
        metadata_field(2, "newsletter", "bool"),
        metadata_field(3, "score", "float"),
        metadata_field(4, "birthday", "datetime"),
        metadata_field(5, "city", "str"),
    ])
}

pub fn contact_data_record(contact_id: i64, data: Vec<(&str, &str)>) -> Value {
    let data: Vec<Value> = data
        .into_iter()
        .map(|(name, value)| json!({"Name": name, "Value": value}))
        .collect();
    json!({"ContactID": contact_id, "Data": data, "ID": contact_id})
}
