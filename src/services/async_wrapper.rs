//! Async wrapper around the synchronous ContactService.
//!
//! Every call runs on `tokio::task::spawn_blocking` so blocking HTTP never
//! stalls the async runtime.

use super::ContactService;
use crate::domain::{ContactEmail, ContactIdentifier};
use crate::error::{MailjetError, MailjetResult};
use crate::models::{Contact, ContactData, MetadataDatatype, MetadataField, MetadataNamespace};
use async_trait::async_trait;
use std::sync::Arc;

/// Async version of the `ContactService` operations.
#[async_trait]
pub trait AsyncContactService: Send + Sync {
    async fn get_contact_by_email(
        &self,
        email: &ContactEmail,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>>;
    async fn get_contact_by_identifier(
        &self,
        identifier: ContactIdentifier,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>>;

    async fn add_new_contact(&self, email: &ContactEmail, name: &str) -> MailjetResult<Contact>;
    async fn update_contact_name(
        &self,
        identifier: ContactIdentifier,
        name: &str,
    ) -> MailjetResult<Contact>;

    async fn fetch_contact_data(
        &self,
        identifier: ContactIdentifier,
    ) -> MailjetResult<Vec<ContactData>>;
    async fn sync_contact_data_attributes(&self, contact: &Contact) -> MailjetResult<bool>;

    async fn add_new_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
        namespace: MetadataNamespace,
    ) -> MailjetResult<bool>;
    async fn add_new_static_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
    ) -> MailjetResult<bool>;
    async fn get_contact_meta_data(&self) -> MailjetResult<Vec<MetadataField>>;

    /// Drop the cached metadata listing. Never blocks on I/O.
    fn invalidate_metadata_cache(&self);
}

/// Shares one `ContactService` (and so one metadata cache) across tasks.
#[derive(Clone)]
pub struct AsyncContactServiceImpl {
    service: Arc<ContactService>,
}

impl AsyncContactServiceImpl {
    pub fn new(service: ContactService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Access the wrapped synchronous service.
    pub fn inner(&self) -> &ContactService {
        &self.service
    }
}

fn join_error(e: tokio::task::JoinError) -> MailjetError {
    MailjetError::Other(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncContactService for AsyncContactServiceImpl {
    async fn get_contact_by_email(
        &self,
        email: &ContactEmail,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>> {
        let service = self.service.clone();
        let email = email.clone();

        tokio::task::spawn_blocking(move || service.get_contact_by_email(&email, include_attributes))
            .await
            .map_err(join_error)?
    }

    async fn get_contact_by_identifier(
        &self,
        identifier: ContactIdentifier,
        include_attributes: bool,
    ) -> MailjetResult<Option<Contact>> {
        let service = self.service.clone();

        tokio::task::spawn_blocking(move || {
            service.get_contact_by_identifier(identifier, include_attributes)
        })
        .await
        .map_err(join_error)?
    }

    async fn add_new_contact(&self, email: &ContactEmail, name: &str) -> MailjetResult<Contact> {
        let service = self.service.clone();
        let email = email.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || service.add_new_contact(&email, &name))
            .await
            .map_err(join_error)?
    }

    async fn update_contact_name(
        &self,
        identifier: ContactIdentifier,
        name: &str,
    ) -> MailjetResult<Contact> {
        let service = self.service.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || service.update_contact_name(identifier, &name))
            .await
            .map_err(join_error)?
    }

    async fn fetch_contact_data(
        &self,
        identifier: ContactIdentifier,
    ) -> MailjetResult<Vec<ContactData>> {
        let service = self.service.clone();

        tokio::task::spawn_blocking(move || service.fetch_contact_data(identifier))
            .await
            .map_err(join_error)?
    }

    async fn sync_contact_data_attributes(&self, contact: &Contact) -> MailjetResult<bool> {
        let service = self.service.clone();
        let contact = contact.clone();

        tokio::task::spawn_blocking(move || service.sync_contact_data_attributes(&contact))
            .await
            .map_err(join_error)?
    }

    async fn add_new_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
        namespace: MetadataNamespace,
    ) -> MailjetResult<bool> {
        let service = self.service.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            service.add_new_contact_metadata_field(&name, datatype, namespace)
        })
        .await
        .map_err(join_error)?
    }

    async fn add_new_static_contact_metadata_field(
        &self,
        name: &str,
        datatype: MetadataDatatype,
    ) -> MailjetResult<bool> {
        let service = self.service.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || {
            service.add_new_static_contact_metadata_field(&name, datatype)
        })
        .await
        .map_err(join_error)?
    }

    async fn get_contact_meta_data(&self) -> MailjetResult<Vec<MetadataField>> {
        let service = self.service.clone();

        tokio::task::spawn_blocking(move || service.get_contact_meta_data())
            .await
            .map_err(join_error)?
    }

    fn invalidate_metadata_cache(&self) {
        self.service.invalidate_metadata_cache();
    }
}
