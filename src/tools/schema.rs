// src/tools/schema.rs

//! # Schema Validator
//!
//! Each tool declares its parameters as a list of [`ParamSpec`]s. The same
//! list is rendered into the advertised JSON `inputSchema` and used to check
//! the shape of incoming arguments (presence, primitive type, enum
//! membership, sign). Finer content rules (string length, ranges, URLs) live
//! as `validator` attributes on the typed argument struct.
//!
//! Validation never stops at the first problem: every violation found is
//! returned so the caller can fix them all at once.

use crate::error::Violation;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub required: bool,
    /// Numeric values must be strictly greater than zero.
    pub positive: bool,
}

impl ParamSpec {
    const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            positive: false,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Number, description)
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    pub const fn one_of(
        name: &'static str,
        variants: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(name, ParamKind::Enum(variants), description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    fn to_json(&self) -> Value {
        let mut prop = Map::new();
        let ty = match self.kind {
            ParamKind::String | ParamKind::Enum(_) => "string",
            ParamKind::Number => "number",
            ParamKind::Integer => "integer",
        };
        prop.insert("type".into(), json!(ty));
        prop.insert("description".into(), json!(self.description));
        if let ParamKind::Enum(variants) = self.kind {
            prop.insert("enum".into(), json!(variants));
        }
        if self.positive {
            prop.insert("exclusiveMinimum".into(), json!(0));
        }
        Value::Object(prop)
    }

    fn check(&self, value: &Value) -> Option<String> {
        let type_error = match self.kind {
            ParamKind::String if !value.is_string() => Some("must be a string".to_string()),
            ParamKind::Number if !value.is_number() => Some("must be a number".to_string()),
            ParamKind::Integer if value.as_i64().is_none() && value.as_u64().is_none() => {
                Some("must be an integer".to_string())
            }
            ParamKind::Enum(variants) => match value.as_str() {
                Some(s) if variants.contains(&s) => None,
                _ => Some(format!("must be one of: {}", variants.join(", "))),
            },
            _ => None,
        };
        if type_error.is_some() {
            return type_error;
        }

        if self.positive && !value.as_f64().is_some_and(|n| n > 0.0) {
            return Some("must be greater than 0".to_string());
        }
        None
    }
}

/// Renders a parameter list as a JSON Schema object.
pub fn input_schema(params: &[ParamSpec]) -> Value {
    let properties: Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.to_json()))
        .collect();
    let required: Vec<&str> = params.iter().filter(|p| p.required).map(|p| p.name).collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Structural check of raw arguments. Absent arguments count as `{}`.
pub fn check(params: &[ParamSpec], args: &Value) -> Vec<Violation> {
    let empty = Map::new();
    let object = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return vec![Violation::new("arguments", "must be an object")],
    };

    params
        .iter()
        .filter_map(|param| match object.get(param.name) {
            None | Some(Value::Null) if param.required => Some(Violation::new(param.name, "is required")),
            None | Some(Value::Null) => None,
            Some(value) => param.check(value).map(|msg| Violation::new(param.name, msg)),
        })
        .collect()
}

fn flatten(errors: ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed {} check", err.code));
                Violation::new(field, message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Checks `args` against `params`, then deserializes and content-validates
/// them into `T`.
pub fn parse<T>(params: &[ParamSpec], args: Value) -> Result<T, Vec<Violation>>
where
    T: DeserializeOwned + Validate,
{
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    let violations = check(params, &args);
    if !violations.is_empty() {
        return Err(violations);
    }

    let typed: T = serde_json::from_value(args)
        .map_err(|e| vec![Violation::new("arguments", e.to_string())])?;
    typed.validate().map_err(flatten)?;
    Ok(typed)
}
