pub mod error;
pub mod service;

pub use error::AuthError;
pub use service::AuthService;
