//! Data models for Mailjet contact entities.
//!
//! Typed counterparts of the `contact`, `contactdata` and `contactmetadata`
//! resources, plus the request payloads sent to them.

pub mod contact;
pub mod contact_data;
pub mod metadata;
pub mod timestamp;

pub use contact::{Contact, CreateContactRequest, RawContact, UpdateContactNameRequest};
pub use contact_data::{
    ContactData, ContactDataEntry, ContactDataValue, RawContactDataRecord,
    UpdateContactDataRequest,
};
pub use metadata::{
    CreateMetadataFieldRequest, MetadataDatatype, MetadataField, MetadataNamespace,
};
