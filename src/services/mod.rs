//! Service layer.
//!
//! `ContactService` is the synchronous core; `AsyncContactService` exposes
//! the same operations to async callers.

mod async_wrapper;
mod contact_service;

pub use async_wrapper::{AsyncContactService, AsyncContactServiceImpl};
pub use contact_service::ContactService;
