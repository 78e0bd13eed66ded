//! Domain value objects.
//!
//! Type-safe wrappers for the Mailjet contact email and contact identifier.
//! Both validate at construction time so an invalid value can never reach
//! the HTTP layer.

pub mod contact_identifier;
pub mod email;
pub mod errors;

pub use contact_identifier::ContactIdentifier;
pub use email::ContactEmail;
pub use errors::ValidationError;
