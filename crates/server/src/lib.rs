//! HTTP surface of the shipment back office: `/health` and REST CRUD for
//! every entity under `/api`, answered in a `{success, message, data}` envelope.

pub mod errors;
pub mod response;
pub mod routes;
pub mod startup;

pub use startup::{build_app, load_config, run};
