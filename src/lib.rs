//! Mailjet Adapter - a typed adapter over the Mailjet contacts API.
//!
//! Fetches, creates and updates Mailjet contacts and their custom
//! attributes, and manages the metadata field definitions that type those
//! attributes.
//!
//! # Architecture
//!
//! - **config**: Configuration from environment variables
//! - **error**: Error types for requests, contact data and configuration
//! - **domain**: Validated value objects (`ContactEmail`, `ContactIdentifier`)
//! - **models**: Contacts, contact data and metadata field definitions
//! - **client**: Blocking HTTP client and the memoizing client factory
//! - **services**: Contact operations, sync and async
//! - **metrics**, **logging**: Request counters and tracing setup
//!
//! # Example
//!
//! ```no_run
//! use mailjet_adapter::{ClientFactory, Config, ContactEmail, ContactService};
//!
//! let factory = ClientFactory::new(Config::from_env()?);
//! let service = ContactService::from_factory(&factory);
//!
//! let email = ContactEmail::new("jane@example.com")?;
//! if let Some(contact) = service.get_contact_by_email(&email, true)? {
//!     println!("{} has {} attributes", contact.name, contact.contact_data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

pub use client::{ApiResponse, ClientFactory, MailjetClient, Resource};
pub use config::Config;
pub use domain::{ContactEmail, ContactIdentifier, ValidationError};
pub use error::{ConfigError, MailjetError, MailjetResult};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{
    Contact, ContactData, ContactDataValue, MetadataDatatype, MetadataField, MetadataNamespace,
};
pub use services::{AsyncContactService, AsyncContactServiceImpl, ContactService};
