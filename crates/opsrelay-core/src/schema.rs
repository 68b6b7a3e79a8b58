//! Declarative input schemas for tool operations.
//!
//! Each tool declares its input contract once as a [`ToolSchema`]; the same
//! declaration produces the JSON schema advertised by `tools/list` and drives
//! validation of untrusted argument mappings before any remote call is made.
//!
//! Validation reports every violated field, not just the first, and fills
//! declared defaults for absent optional fields. Enum-like fields advertise
//! their domain but are not enforced here: the remote API stays the authority
//! on legality.

use crate::error::{ToolError, Violation, Violations};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    StringList,
}

impl FieldKind {
    fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::StringList => "array",
        }
    }

    fn expectation(self) -> &'static str {
        match self {
            Self::String => "must be a string",
            Self::Integer => "must be a non-negative integer",
            Self::Number => "must be a number",
            Self::StringList => "must be an array of strings",
        }
    }
}

/// Declarative constraint set for one input field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    description: &'static str,
    required: bool,
    non_empty: bool,
    default: Option<Value>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    allowed: Option<&'static [&'static str]>,
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            non_empty: false,
            default: None,
            minimum: None,
            maximum: None,
            allowed: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Integer, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Number, description)
    }

    pub fn string_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::StringList, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Reject empty strings. Only meaningful for string fields.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_list(mut self, values: &'static [&'static str]) -> Self {
        self.default = Some(Value::Array(
            values.iter().map(|v| Value::String((*v).to_string())).collect(),
        ));
        self
    }

    /// Inclusive numeric range.
    pub fn range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    /// Inclusive lower bound.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Advertised value domain. Not enforced at validation time; invalid
    /// members pass through to the remote API.
    pub fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    fn property_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        prop.insert("description".into(), json!(self.description));
        if self.kind == FieldKind::StringList {
            prop.insert("items".into(), json!({ "type": "string" }));
        }
        if let Some(values) = self.allowed {
            prop.insert("enum".into(), json!(values));
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            prop.insert("minimum".into(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            prop.insert("maximum".into(), json!(maximum));
        }
        Value::Object(prop)
    }

    /// Check one present value, pushing any violations found.
    fn check(&self, value: &Value, violations: &mut Vec<Violation>) -> bool {
        match self.kind {
            FieldKind::String => match value.as_str() {
                Some(s) if self.non_empty && s.is_empty() => {
                    violations.push(Violation::new(self.name, "must not be empty"));
                    false
                }
                Some(_) => true,
                None => {
                    violations.push(Violation::new(self.name, self.kind.expectation()));
                    false
                }
            },
            FieldKind::Integer => match value.as_u64() {
                Some(n) => self.check_bounds(n as f64, violations),
                None => {
                    violations.push(Violation::new(self.name, self.kind.expectation()));
                    false
                }
            },
            FieldKind::Number => match value.as_f64() {
                Some(n) => self.check_bounds(n, violations),
                None => {
                    violations.push(Violation::new(self.name, self.kind.expectation()));
                    false
                }
            },
            FieldKind::StringList => {
                let all_strings = value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                if !all_strings {
                    violations.push(Violation::new(self.name, self.kind.expectation()));
                }
                all_strings
            }
        }
    }

    fn check_bounds(&self, n: f64, violations: &mut Vec<Violation>) -> bool {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) if n < min || n > max => {
                violations.push(Violation::new(
                    self.name,
                    format!("must be between {} and {}", min, max),
                ));
                false
            }
            (Some(min), None) if n < min => {
                violations.push(Violation::new(self.name, format!("must be at least {}", min)));
                false
            }
            _ => true,
        }
    }
}

/// Ordered input contract for one tool.
#[derive(Debug, Clone, Default)]
pub struct ToolSchema {
    fields: Vec<FieldSpec>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Machine-readable description of the accepted shape, for `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name.to_string(), field.property_schema());
            if field.required {
                required.push(Value::String(field.name.to_string()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Validate a raw argument mapping against this schema.
    ///
    /// On success the returned [`ValidatedArgs`] holds every declared field
    /// that was present or defaulted; undeclared keys are dropped. On failure
    /// the error lists all violations.
    pub fn validate(&self, arguments: &Value) -> Result<ValidatedArgs, Violations> {
        let empty = Map::new();
        let raw = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(Violations(vec![Violation::new(
                    "arguments",
                    "must be an object",
                )]));
            }
        };

        let mut values = Map::new();
        let mut violations = Vec::new();
        for field in &self.fields {
            match raw.get(field.name) {
                Some(value) if !value.is_null() => {
                    if field.check(value, &mut violations) {
                        values.insert(field.name.to_string(), value.clone());
                    }
                }
                _ => {
                    if field.required {
                        violations.push(Violation::new(field.name, "is required"));
                    } else if let Some(default) = &field.default {
                        values.insert(field.name.to_string(), default.clone());
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(ValidatedArgs { values })
        } else {
            Err(Violations(violations))
        }
    }
}

/// Typed, defaulted, constraint-checked form of raw invocation arguments.
///
/// A value of this type only exists if every required field was present and
/// every field satisfied its constraints.
#[derive(Debug, Clone)]
pub struct ValidatedArgs {
    values: Map<String, Value>,
}

impl ValidatedArgs {
    /// Deserialize into a handler's parameter struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.values)).map_err(ToolError::internal)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
