//! SeaORM entities for the shipment back office plus connection helpers.
//!
//! Parents: `sender`, `customer` (own packages), `vendor`, `courier`
//! (referenced by shipments). Children: `package`, `shipment`.
//! Delete behaviour of every link is declared in the `migration` crate.

pub mod db;
pub mod kind;
pub mod sender;
pub mod customer;
pub mod vendor;
pub mod courier;
pub mod package;
pub mod shipment;

pub use kind::EntityKind;

use chrono::{SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time truncated to microseconds, the finest precision every
/// supported backend stores, so a written timestamp reads back unchanged.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().trunc_subsecs(6).into()
}

#[cfg(test)]
mod tests;
