//! Service layer for the shipment back office.
//! - Validates raw request bodies against per-entity rule sets.
//! - Persists through the entities in the `models` crate, one transaction per write.
//! - Exposes every entity through the same `ResourceService` contract.

pub mod errors;
pub mod resource;
pub mod resources;
#[cfg(test)]
pub mod test_support;
pub mod validation;

pub use errors::ServiceError;
pub use resource::ResourceService;
pub use resources::Services;
pub use validation::{Input, Validator};
