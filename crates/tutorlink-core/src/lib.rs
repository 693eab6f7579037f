//! # Tutorlink Core
//!
//! Foundational types shared by the Tutorlink client crates.
//!
//! - [`storage`]: key-value persistence behind a swappable trait
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use tutorlink_core::storage::{KeyValueStorage, LocalFileStorage};
//!
//! let storage = LocalFileStorage::new("./.tutorlink");
//! storage.save("auth-store", r#"{"state":{}}"#).await?;
//! let raw = storage.load("auth-store").await?;
//! ```

pub mod serde;
pub mod storage;

// Re-export commonly used types at crate root
pub use storage::{KeyValueStorage, LocalFileStorage, MemoryStorage, StorageError, StorageFuture};
