pub mod auth;
pub mod availability;
pub mod students;

pub use self::auth::{AuthError, AuthService};
pub use self::availability::AvailabilityService;
pub use self::students::StudentService;
