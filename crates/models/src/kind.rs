use std::fmt;

use serde::Serialize;

/// The six record types of the back office.
///
/// Used wherever code has to name an entity at runtime: validation rules
/// (`unique:`/`exists:` targets), error messages and route segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sender,
    Customer,
    Vendor,
    Courier,
    Package,
    Shipment,
}

impl EntityKind {
    /// Human readable name, as used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Sender => "Sender",
            EntityKind::Customer => "Customer",
            EntityKind::Vendor => "Vendor",
            EntityKind::Courier => "Courier",
            EntityKind::Package => "Package",
            EntityKind::Shipment => "Shipment",
        }
    }

    /// Plural path segment under the API prefix.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Sender => "senders",
            EntityKind::Customer => "customers",
            EntityKind::Vendor => "vendors",
            EntityKind::Courier => "couriers",
            EntityKind::Package => "packages",
            EntityKind::Shipment => "shipments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
