pub mod environment;
pub mod origin;
pub mod registration;

pub use environment::{Auth0Config, Environment};
pub use origin::{Origin, OriginError};
pub use registration::{AvailabilityResponse, FieldError, RegistrationErrorResponse};
