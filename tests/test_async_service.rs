//! AsyncContactService facade tests.

mod fixtures;

use fixtures::*;
use mailjet_adapter::{
    AsyncContactService, AsyncContactServiceImpl, ClientFactory, Config, ContactDataValue,
    ContactEmail, ContactIdentifier, ContactService, MetadataDatatype,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_async_lookup_with_attributes() {
    let mut server = Server::new_async().await;

    let contact_mock = server
        .mock("GET", "/v3/REST/contact/21")
        .with_status(200)
        .with_body(envelope(vec![contact_record(21, "ada@example.com", "Ada")]))
        .create_async()
        .await;
    let data_mock = server
        .mock("GET", "/v3/REST/contactdata/21")
        .with_status(200)
        .with_body(envelope(vec![contact_data_record(21, vec![("age", "36")])]))
        .create_async()
        .await;
    let metadata_mock = server
        .mock("GET", "/v3/REST/contactmetadata")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(metadata_listing())
        .expect(1)
        .create_async()
        .await;

    let service = AsyncContactServiceImpl::new(live_service(server.url()));
    let identifier = ContactIdentifier::new(21).unwrap();
    let contact = service
        .get_contact_by_identifier(identifier, true)
        .await
        .unwrap()
        .unwrap();

    // Second listing request must come from the shared cache.
    service.get_contact_meta_data().await.unwrap();

    contact_mock.assert_async().await;
    data_mock.assert_async().await;
    metadata_mock.assert_async().await;
    assert_eq!(contact.name, "Ada");
    assert_eq!(
        contact.contact_data_by_name("age").unwrap().value,
        ContactDataValue::Integer(36)
    );
}

#[tokio::test]
async fn test_async_lookup_by_email_not_found() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock(
            "GET",
            Matcher::Regex(r"^/v3/REST/contact/ghost(%40|@)example\.com$".to_string()),
        )
        .with_status(404)
        .create_async()
        .await;

    let service = AsyncContactServiceImpl::new(live_service(server.url()));
    let email = ContactEmail::new("ghost@example.com").unwrap();
    let result = service.get_contact_by_email(&email, false).await.unwrap();

    mock.assert_async().await;
    assert!(result.is_none());
}

#[tokio::test]
async fn test_async_static_field_and_cache_invalidation() {
    let mut server = Server::new_async().await;

    let listing = server
        .mock("GET", "/v3/REST/contactmetadata")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(metadata_listing())
        .expect(2)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/v3/REST/contactmetadata")
        .match_body(Matcher::Json(
            json!({"Name": "company", "NameSpace": "static", "Datatype": "str"}),
        ))
        .with_status(201)
        .with_body(envelope(vec![metadata_field(6, "company", "str")]))
        .expect(1)
        .create_async()
        .await;

    let service = AsyncContactServiceImpl::new(live_service(server.url()));

    let created = service
        .add_new_static_contact_metadata_field("company", MetadataDatatype::Str)
        .await
        .unwrap();
    assert!(created);

    // Served from the cache, which now holds the new field.
    let cached = service.get_contact_meta_data().await.unwrap();
    assert!(cached.iter().any(|field| field.name == "company"));

    service.invalidate_metadata_cache();
    let refetched = service.get_contact_meta_data().await.unwrap();
    assert_eq!(refetched.len(), 5);

    listing.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_async_service_from_factory_in_sandbox_mode() {
    let server = Server::new_async().await;
    let config = Config {
        api_key: API_KEY.to_string(),
        api_secret: API_SECRET.to_string(),
        live_mode: false,
        api_url: server.url(),
        ..Config::default()
    };

    let factory = ClientFactory::new(config);
    let service = ContactService::from_factory(&factory);
    assert!(Arc::ptr_eq(&factory.create_client(), &factory.create_client()));

    let service = AsyncContactServiceImpl::new(service);
    let identifier = ContactIdentifier::new(3).unwrap();
    let contact = mailjet_adapter::Contact::new(
        identifier,
        ContactEmail::new("sandbox@example.com").unwrap(),
        chrono::Utc::now(),
    );

    // Nothing is sent, so no record is reported as affected.
    let synced = service.sync_contact_data_attributes(&contact).await.unwrap();
    assert!(!synced);
    assert_eq!(service.inner().client().metrics().suppressed_writes_total(), 1);
}
