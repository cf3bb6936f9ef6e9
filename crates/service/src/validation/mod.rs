//! Request validation.
//!
//! A [`Validator`] takes the raw JSON object of a request and an entity
//! [`Schema`] and returns either the normalized field set or every violated
//! field with every rule it violated. Rules that need the store (`unique`,
//! `exists`) run on the connection handed in, which for writes is the
//! transaction the write happens in.
//!
//! On [`Mode::Update`] absent fields are skipped ("sometimes" semantics) and
//! `unique` rules on the validated entity ignore the row being updated.

pub mod errors;
mod lookup;
pub mod rules;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use configs::ValidationConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{ConnectionTrait, DbErr};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use tracing::debug;
use uuid::Uuid;
use validator::ValidateEmail;

pub use errors::{ValidationErrors, Violation};
pub use rules::{FieldRules, Rule, Schema};

use crate::errors::ServiceError;

/// Raw request body: a JSON object, untyped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input(Map<String, Value>);

impl Input {
    /// Accept only JSON objects.
    pub fn from_value(value: Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => {
                let mut errs = ValidationErrors::new();
                errs.add("body", "object", "The request body must be a JSON object.");
                Err(errs)
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update { id: Uuid },
}

/// Validation engine shared by all resource services.
#[derive(Debug, Clone)]
pub struct Validator {
    convert_empty_strings_to_null: bool,
}

impl Default for Validator {
    fn default() -> Self { Self { convert_empty_strings_to_null: true } }
}

impl Validator {
    pub fn new(cfg: &ValidationConfig) -> Self {
        Self { convert_empty_strings_to_null: cfg.convert_empty_strings_to_null }
    }

    /// Check `input` against `schema`; returns the normalized fields.
    pub async fn validate<C: ConnectionTrait>(
        &self,
        conn: &C,
        schema: &Schema,
        input: &Input,
        mode: Mode,
    ) -> Result<Map<String, Value>, ServiceError> {
        let mut errors = ValidationErrors::new();
        let mut out = Map::new();

        for field in &schema.fields {
            let Some(raw) = input.get(field.field) else {
                if mode == Mode::Create && field.has(&Rule::Required) {
                    errors.add(field.field, "required", format!("The {} field is required.", field.label()));
                }
                continue;
            };
            let Some(value) = check_static(field, self.normalize(raw), &mut errors) else {
                continue;
            };
            if !value.is_null() {
                check_lookups(conn, schema, field, &value, mode, &mut errors).await?;
            }
            out.insert(field.field.to_string(), value);
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            debug!(entity = %schema.entity, fields = %errors, "validation_failed");
            Err(ServiceError::Validation(errors))
        }
    }

    /// [`validate`](Self::validate), then deserialize into the typed input.
    pub async fn validate_into<T, C>(&self, conn: &C, schema: &Schema, input: &Input, mode: Mode) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
        C: ConnectionTrait,
    {
        let fields = self.validate(conn, schema, input, mode).await?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| ServiceError::Internal(format!("validated {} input does not fit its type: {e}", schema.entity)))
    }

    /// Trim strings; blank strings become `null` when configured.
    fn normalize(&self, raw: &Value) -> Value {
        match raw {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() && self.convert_empty_strings_to_null {
                    Value::Null
                } else {
                    Value::String(trimmed.to_string())
                }
            }
            other => other.clone(),
        }
    }
}

/// Type, format and length rules. Returns the normalized value when the
/// field passed all of them.
fn check_static(field: &FieldRules, value: Value, errors: &mut ValidationErrors) -> Option<Value> {
    let label = field.label();
    if value.is_null() {
        if field.has(&Rule::Nullable) {
            return Some(Value::Null);
        }
        if field.has(&Rule::Required) {
            errors.add(field.field, "required", format!("The {label} field is required."));
            return None;
        }
    }

    let mut value = value;
    let mut ok = true;
    for rule in &field.rules {
        match rule {
            Rule::Required | Rule::Nullable | Rule::Unique { .. } | Rule::Exists { .. } => {}
            Rule::String => {
                if !value.is_string() {
                    errors.add(field.field, "string", format!("The {label} field must be a string."));
                    return None;
                }
            }
            Rule::Numeric => match as_number(&value) {
                Some(n) => value = n,
                None => {
                    errors.add(field.field, "numeric", format!("The {label} field must be a number."));
                    return None;
                }
            },
            Rule::Decimal { precision, scale } => match as_decimal(&value) {
                Some(d) => match fit_decimal(d, *precision, *scale) {
                    Ok(d) => value = Value::String(d.to_string()),
                    Err(max) => {
                        errors.add(
                            field.field,
                            "decimal",
                            format!("The {label} field must be between -{max} and {max}."),
                        );
                        return None;
                    }
                },
                // digits beyond what a decimal can hold
                None if as_number(&value).is_some() => {
                    let max = decimal_max(*precision, *scale);
                    errors.add(field.field, "decimal", format!("The {label} field must be between -{max} and {max}."));
                    return None;
                }
                None => {
                    errors.add(field.field, "numeric", format!("The {label} field must be a number."));
                    return None;
                }
            },
            Rule::Date => match as_date(&value) {
                Some(d) => value = Value::String(d.format("%Y-%m-%d").to_string()),
                None => {
                    errors.add(field.field, "date", format!("The {label} field must be a valid date."));
                    return None;
                }
            },
            Rule::Uuid => match value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
                Some(id) => value = Value::String(id.to_string()),
                // a malformed reference is reported like a dangling one
                None if field.rules.iter().any(|r| matches!(r, Rule::Exists { .. })) => {
                    errors.add(field.field, "exists", format!("The selected {label} is invalid."));
                    return None;
                }
                None => {
                    errors.add(field.field, "uuid", format!("The {label} field must be a valid UUID."));
                    return None;
                }
            },
            Rule::Email => {
                if value.as_str().is_some_and(|s| !is_email(s)) {
                    errors.add(field.field, "email", format!("The {label} field must be a valid email address."));
                    ok = false;
                }
            }
            Rule::MaxLength(max) => {
                if value.as_str().is_some_and(|s| s.chars().count() > *max) {
                    errors.add(
                        field.field,
                        "max-length",
                        format!("The {label} field must not be greater than {max} characters."),
                    );
                    ok = false;
                }
            }
        }
    }
    ok.then_some(value)
}

async fn check_lookups<C: ConnectionTrait>(
    conn: &C,
    schema: &Schema,
    field: &FieldRules,
    value: &Value,
    mode: Mode,
    errors: &mut ValidationErrors,
) -> Result<(), DbErr> {
    for rule in field.rules.iter().filter(|r| r.is_lookup()) {
        match rule {
            Rule::Unique { entity, column } => {
                let except = match mode {
                    Mode::Update { id } if *entity == schema.entity => Some(id),
                    _ => None,
                };
                let Some(bound) = bind(field, value) else { continue };
                if lookup::count_matching(conn, *entity, column, bound, except).await? > 0 {
                    errors.add(field.field, "unique", format!("The {} has already been taken.", field.label()));
                }
            }
            Rule::Exists { entity } => {
                let found = match value.as_str().and_then(|s| Uuid::parse_str(s).ok()) {
                    Some(id) => lookup::id_exists(conn, *entity, id).await?,
                    None => false,
                };
                if !found {
                    errors.add(field.field, "exists", format!("The selected {} is invalid.", field.label()));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Store value for a normalized field; ids bind as UUIDs, not text.
fn bind(field: &FieldRules, value: &Value) -> Option<sea_orm::Value> {
    if field.has(&Rule::Uuid) {
        return value.as_str().and_then(|s| Uuid::parse_str(s).ok()).map(sea_orm::Value::from);
    }
    match value {
        Value::String(s) => Some(sea_orm::Value::from(s.clone())),
        Value::Number(n) => n.as_f64().map(sea_orm::Value::from),
        Value::Bool(b) => Some(sea_orm::Value::from(*b)),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<Value> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Number::from_f64(n).map(Value::Number)
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)).ok()
}

/// Round half away from zero to `scale` places and pad to it; `Err` carries
/// the largest value the column holds.
fn fit_decimal(d: Decimal, precision: u32, scale: u32) -> Result<Decimal, Decimal> {
    let mut rounded = d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let max = decimal_max(precision, scale);
    if rounded.abs() > max {
        return Err(max);
    }
    rounded.rescale(scale);
    Ok(rounded)
}

fn decimal_max(precision: u32, scale: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(precision) - 1, scale)
}

fn as_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

fn is_email(s: &str) -> bool {
    s.validate_email()
}

/// Deserialize a present field as `Some(value)`, so that an explicit `null`
/// becomes `Some(None)` and an absent field stays `None` (with
/// `#[serde(default)]`).
pub fn present<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}
