use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule name as written in rule sets, e.g. `required`, `unique`.
    pub rule: &'static str,
    pub message: String,
}

/// Every violated field with every rule it violated.
///
/// Serializes as `{ "field": ["message", ...] }`, the shape the dashboard
/// renders next to form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Vec<Violation>>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, field: &str, rule: &'static str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(Violation { rule, message: message.into() });
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn get(&self, field: &str) -> Option<&[Violation]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Whether `field` failed `rule`.
    pub fn has(&self, field: &str, rule: &str) -> bool {
        self.get(field).is_some_and(|vs| vs.iter().any(|v| v.rule == rule))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(field, vs)| (field, vs.iter().map(|v| v.message.as_str()).collect::<Vec<_>>())),
        )
    }
}
