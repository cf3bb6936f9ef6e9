use std::fmt;

use models::EntityKind;

/// A single constraint on an input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Must be present (on create) and non-null.
    Required,
    /// `null` is accepted and skips the remaining rules.
    Nullable,
    String,
    /// Number, or a string holding one.
    Numeric,
    /// Exact number rounded to `scale` places, at most `precision` digits.
    Decimal { precision: u32, scale: u32 },
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    Date,
    Email,
    /// Record id.
    Uuid,
    /// Maximum length in characters.
    MaxLength(usize),
    /// No other row of `entity` holds this value in `column`. On update the
    /// row being updated is excluded when `entity` is the validated entity.
    Unique { entity: EntityKind, column: &'static str },
    /// A row of `entity` with this id exists.
    Exists { entity: EntityKind },
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Nullable => "nullable",
            Rule::String => "string",
            Rule::Numeric => "numeric",
            Rule::Decimal { .. } => "decimal",
            Rule::Date => "date",
            Rule::Email => "email",
            Rule::Uuid => "uuid",
            Rule::MaxLength(_) => "max-length",
            Rule::Unique { .. } => "unique",
            Rule::Exists { .. } => "exists",
        }
    }

    /// Rules that need a round-trip to the store.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Rule::Unique { .. } | Rule::Exists { .. })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MaxLength(n) => write!(f, "max-length:{n}"),
            Rule::Decimal { precision, scale } => write!(f, "decimal:{precision},{scale}"),
            Rule::Unique { entity, column } => write!(f, "unique:{}.{column}", entity.collection()),
            Rule::Exists { entity } => write!(f, "exists:{}.id", entity.collection()),
            other => f.write_str(other.name()),
        }
    }
}

/// The ordered rules of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(field: &'static str) -> Self {
        Self { field, rules: Vec::new() }
    }

    fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self { self.with(Rule::Required) }
    pub fn nullable(self) -> Self { self.with(Rule::Nullable) }
    pub fn string(self) -> Self { self.with(Rule::String) }
    pub fn numeric(self) -> Self { self.with(Rule::Numeric) }
    pub fn decimal(self, precision: u32, scale: u32) -> Self { self.with(Rule::Decimal { precision, scale }) }
    pub fn date(self) -> Self { self.with(Rule::Date) }
    pub fn email(self) -> Self { self.with(Rule::Email) }
    pub fn uuid(self) -> Self { self.with(Rule::Uuid) }
    pub fn max(self, n: usize) -> Self { self.with(Rule::MaxLength(n)) }

    pub fn unique(self, entity: EntityKind, column: &'static str) -> Self {
        self.with(Rule::Unique { entity, column })
    }

    pub fn exists(self, entity: EntityKind) -> Self {
        self.with(Rule::Exists { entity })
    }

    pub fn has(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Name shown in messages: `phone_number` -> `phone number`.
    pub fn label(&self) -> String {
        self.field.replace('_', " ")
    }
}

impl fmt::Display for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.rules.iter().map(Rule::to_string).collect();
        write!(f, "{}: {}", self.field, parts.join("|"))
    }
}

/// Rule set for one entity.
#[derive(Debug, Clone)]
pub struct Schema {
    pub entity: EntityKind,
    pub fields: Vec<FieldRules>,
}

impl Schema {
    pub fn new(entity: EntityKind, fields: Vec<FieldRules>) -> Self {
        Self { entity, fields }
    }
}
