pub mod service;

pub use service::AvailabilityService;
