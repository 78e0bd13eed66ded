//! Contact service layer.
//!
//! Runs every Mailjet contact operation and maps raw records into the typed
//! models. A `ContactService` owns its metadata-field cache, so each
//! instance fetches the metadata listing at most once until the cache is
//! invalidated.

use crate::client::{ApiResponse, ClientFactory, MailjetClient, Resource};
use crate::domain::{ContactEmail, ContactIdentifier};
use crate::error::{MailjetError, MailjetResult};
use crate::models::{
    Contact, ContactData, ContactDataValue, CreateContactRequest, CreateMetadataFieldRequest,
    MetadataDatatype, MetadataField, MetadataNamespace, RawContact, RawContactDataRecord,
    UpdateContactDataRequest, UpdateContactNameRequest,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Upper bound on metadata definitions requested in one listing.
const METADATA_LIST_LIMIT: &str = "1000";

/// Mailjet contact operations over a shared client handle.
pub struct ContactService {
    client: Arc<MailjetClient>,
    metadata_cache: RwLock<Option<Vec<MetadataField>>>,
}

impl ContactService {
    pub fn new(client: Arc<MailjetClient>) -> Self {
        Self {
            client,
            metadata_cache: RwLock::new(None),
        }
    }

    /// Create a service using the factory's shared client.
    pub fn from_factory(factory: &ClientFactory) -> Self {
        Self::new(factory.create_client())
    }

    pub fn client(&self) -> &MailjetClient {
        &self.client
    }

    /// Look up a contact by email.
    ///
    /// Returns `Ok(None)` if Mailjet has no such contact. With
    /// `include_attributes`, the contact data is fetched and attached.
    pub fn get_contact_by_email(
        &self,
        email: &ContactEmail,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>> {
        self.fetch_contact(email.as_str(), include_attributes)
    }

    /// Look up a contact by its Mailjet ID.
    pub fn get_contact_by_identifier(
        &self,
        identifier: ContactIdentifier,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>> {
        self.fetch_contact(&identifier.to_string(), include_attributes)
    }

    /// Look up a contact by ID, always including its contact data.
    pub fn get_contact_by_identifier_with_attributes(
        &self,
        identifier: ContactIdentifier,
    ) -> MailjetResult<Option<Contact>> {
        self.get_contact_by_identifier(identifier, true)
    }

    /// Create a contact and return it as Mailjet stored it.
    pub fn add_new_contact(&self, email: &ContactEmail, name: &str) -> MailjetResult<Contact> {
        let body = serde_json::to_value(CreateContactRequest {
            name: name.to_string(),
            email: email.to_string(),
        })?;

        let response = self.client.post(Resource::Contact, &body)?.into_success()?;
        let contact = self.first_contact(&response)?;

        info!("Created Mailjet contact {} ({})", contact.identifier(), email);
        Ok(contact)
    }

    /// Change the display name of a contact.
    pub fn update_contact_name(
        &self,
        identifier: ContactIdentifier,
        name: &str,
    ) -> MailjetResult<Contact> {
        let body = serde_json::to_value(UpdateContactNameRequest {
            name: name.to_string(),
        })?;

        let response = self
            .client
            .put(Resource::Contact, &identifier.to_string(), &body)?
            .into_success()?;

        debug!("Updated name of Mailjet contact {}", identifier);
        self.first_contact(&response)
    }

    /// Overwrite the remote contact data with `contact.contact_data`.
    ///
    /// Returns true if exactly one record was affected.
    pub fn sync_contact_data_attributes(&self, contact: &Contact) -> MailjetResult<bool> {
        let request = UpdateContactDataRequest::from_contact_data(&contact.contact_data);
        let body = serde_json::to_value(&request)?;

        let response = self
            .client
            .put(
                Resource::ContactData,
                &contact.identifier().to_string(),
                &body,
            )?
            .into_success()?;

        debug!(
            "Synced {} attributes of Mailjet contact {} (count {})",
            request.data.len(),
            contact.identifier(),
            response.count
        );
        Ok(response.count == 1)
    }

    /// Register a new metadata field.
    ///
    /// # Errors
    ///
    /// Returns `MailjetError::InvalidContactData` if a field with `name` is
    /// already known.
    pub fn add_new_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
        namespace: MetadataNamespace,
    ) -> MailjetResult<bool> {
        if self.find_metadata_field(name)?.is_some() {
            return Err(MailjetError::InvalidContactData(format!(
                "A metadata field with the name {} already exists",
                name
            )));
        }

        let request = CreateMetadataFieldRequest {
            name: name.to_string(),
            namespace,
            datatype,
        };
        let body = serde_json::to_value(&request)?;
        let response = self
            .client
            .post(Resource::ContactMetadata, &body)?
            .into_success()?;

        let created = response.count == 1;
        if created {
            let field = response
                .first_record::<MetadataField>(Resource::ContactMetadata)
                .unwrap_or(MetadataField {
                    id: 0,
                    name: request.name,
                    namespace,
                    datatype,
                });
            info!("Registered Mailjet metadata field {} ({})", field.name, datatype);
            self.remember_metadata_field(field);
        }

        Ok(created)
    }

    /// Register a new metadata field in the `static` namespace.
    pub fn add_new_static_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
    ) -> MailjetResult<bool> {
        self.add_new_contact_metadata_field(name, datatype, MetadataNamespace::default())
    }

    /// All metadata field definitions, fetched once per service instance.
    pub fn get_contact_meta_data(&self) -> MailjetResult<Vec<MetadataField>> {
        if let Ok(cache) = self.metadata_cache.read() {
            if let Some(fields) = cache.as_ref() {
                return Ok(fields.clone());
            }
        }

        let response = self
            .client
            .get(
                Resource::ContactMetadata,
                None,
                &[("Limit", METADATA_LIST_LIMIT)],
            )?
            .into_success()?;
        let fields: Vec<MetadataField> = response.records()?;

        self.client.metrics().record_metadata_fetch();
        debug!("Fetched {} Mailjet metadata fields", fields.len());

        if let Ok(mut cache) = self.metadata_cache.write() {
            *cache = Some(fields.clone());
        }
        Ok(fields)
    }

    /// Drop the cached metadata listing so the next call fetches it again.
    pub fn invalidate_metadata_cache(&self) {
        if let Ok(mut cache) = self.metadata_cache.write() {
            *cache = None;
        }
    }

    /// Fetch and type the contact data of one contact.
    ///
    /// Each value is converted according to the `Datatype` of the metadata
    /// field with the same name. Values without a known field stay strings.
    pub fn fetch_contact_data(
        &self,
        identifier: ContactIdentifier,
    ) -> MailjetResult<Vec<ContactData>> {
        let response = self
            .client
            .get(Resource::ContactData, Some(&identifier.to_string()), &[])?
            .into_success()?;

        let record = match response.records::<RawContactDataRecord>()?.into_iter().next() {
            Some(record) if !record.data.is_empty() => record,
            _ => return Ok(Vec::new()),
        };

        let metadata = self.get_contact_meta_data()?;

        record
            .data
            .into_iter()
            .map(|entry| -> MailjetResult<ContactData> {
                let value = match metadata.iter().find(|field| field.name == entry.name) {
                    Some(field) => ContactDataValue::parse(&entry.name, &entry.value, field.datatype)?,
                    None => {
                        warn!(
                            "No metadata field named {:?} for contact {}; keeping value as string",
                            entry.name, identifier
                        );
                        ContactDataValue::String(entry.value)
                    }
                };
                Ok(ContactData {
                    name: entry.name,
                    value,
                })
            })
            .collect()
    }

    fn fetch_contact(&self, key: &str, include_attributes: bool) -> MailjetResult<Option<Contact>> {
        let response = match self.client.get(Resource::Contact, Some(key), &[])?.into_success() {
            Ok(response) => response,
            Err(e) if e.is_not_found() => {
                debug!("Mailjet contact {} not found", key);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if response.count == 0 || response.data.is_empty() {
            debug!("Mailjet contact lookup for {} returned no records", key);
            return Ok(None);
        }

        let mut contact = self.first_contact(&response)?;

        if include_attributes {
            let contact_data = self.fetch_contact_data(contact.identifier())?;
            contact.set_contact_data(contact_data);
        }

        Ok(Some(contact))
    }

    fn first_contact(&self, response: &ApiResponse) -> MailjetResult<Contact> {
        let raw: RawContact = response.first_record(Resource::Contact)?;
        let contact = Contact::try_from(raw)?;
        self.client.metrics().record_contacts_fetched(1);
        Ok(contact)
    }

    fn find_metadata_field(&self, name: &str) -> MailjetResult<Option<MetadataField>> {
        Ok(self
            .get_contact_meta_data()?
            .into_iter()
            .find(|field| field.name == name))
    }

    fn remember_metadata_field(&self, field: MetadataField) {
        if let Ok(mut cache) = self.metadata_cache.write() {
            if let Some(fields) = cache.as_mut() {
                fields.push(field);
            }
        }
    }
}
