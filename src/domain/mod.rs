//! Domain layer: schemas, validation rules, errors and ports.

pub mod errors;
pub mod models;
pub mod ports;
pub mod validation;

pub use errors::{ConnectionError, TrackerApiError, TrackerError, TrackerResult};
pub use validation::{FieldViolation, Validate, ValidationErrors};
