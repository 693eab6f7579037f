//! HTTP plumbing shared by every API operation.

pub mod authorizer;
pub mod client;
pub mod error;

pub use authorizer::RequestAuthorizer;
pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use error::ApiError;
