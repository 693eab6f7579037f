//! # Tutorlink Models
//!
//! Request and response shapes exchanged with the tutoring API.
//!
//! - [`users`]: the authenticated [`User`] and its [`Role`]
//! - [`auth`]: login/register requests and responses
//! - [`students`]: student profile payloads
//! - [`availability`]: weekly availability slots

pub mod auth;
pub mod availability;
pub mod students;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
pub use availability::{AvailabilitySlot, AvailabilitySlotUpdate, NewAvailabilitySlot};
pub use students::{Grade, StudentProfile, StudentProfilePayload, TargetExam};
pub use users::{Role, User};
