use serde_json::Value;
use thiserror::Error;

use crate::error::ApiError;

/// One structural requirement on a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Field must be present and hold a JSON array.
    Sequence(&'static str),
    /// Field must be present and hold a JSON array of objects.
    Records(&'static str),
    /// Like [`FieldRule::Records`], but an absent or null field passes.
    OptionalRecords(&'static str),
    /// Field must be present and hold a JSON number.
    Number(&'static str),
    /// Field must be present and non-null.
    Present(&'static str),
    /// At least one of the fields must be present and non-null.
    AnyOf(&'static [&'static str]),
}

/// Minimal schema applied to a successful response before it is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    object: bool,
    rules: &'static [FieldRule],
}

/// Reason a payload failed its [`ResponseShape`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' must be a sequence, found {found}")]
    NotASequence {
        field: &'static str,
        found: &'static str,
    },
    #[error("field '{field}' element {index} must be an object, found {found}")]
    NotARecord {
        field: &'static str,
        index: usize,
        found: &'static str,
    },
    #[error("field '{field}' must be a number, found {found}")]
    NotANumber {
        field: &'static str,
        found: &'static str,
    },
    #[error("expected one of {0:?}")]
    NoneOf(&'static [&'static str]),
}

impl From<ShapeViolation> for ApiError {
    fn from(violation: ShapeViolation) -> Self {
        ApiError::invalid_response(Some(violation.to_string()))
    }
}

impl ResponseShape {
    /// Accept any well-formed JSON.
    pub const ANY: Self = Self {
        object: false,
        rules: &[],
    };

    /// Accept any JSON object.
    pub const OBJECT: Self = Self {
        object: true,
        rules: &[],
    };

    /// JSON object satisfying every rule.
    pub const fn object_with(rules: &'static [FieldRule]) -> Self {
        Self {
            object: true,
            rules,
        }
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    /// Check `payload` against this shape, reporting the first violation.
    pub fn validate(&self, payload: &Value) -> Result<(), ShapeViolation> {
        if !self.object {
            return Ok(());
        }

        let Value::Object(map) = payload else {
            return Err(ShapeViolation::NotAnObject {
                found: json_type_name(payload),
            });
        };

        for rule in self.rules {
            match *rule {
                FieldRule::Sequence(field) => match map.get(field) {
                    None | Some(Value::Null) => return Err(ShapeViolation::MissingField(field)),
                    Some(Value::Array(_)) => {}
                    Some(other) => {
                        return Err(ShapeViolation::NotASequence {
                            field,
                            found: json_type_name(other),
                        });
                    }
                },
                FieldRule::Records(field) => match map.get(field) {
                    None | Some(Value::Null) => return Err(ShapeViolation::MissingField(field)),
                    Some(value) => check_records(field, value)?,
                },
                FieldRule::OptionalRecords(field) => match map.get(field) {
                    None | Some(Value::Null) => {}
                    Some(value) => check_records(field, value)?,
                },
                FieldRule::Number(field) => match map.get(field) {
                    None | Some(Value::Null) => return Err(ShapeViolation::MissingField(field)),
                    Some(Value::Number(_)) => {}
                    Some(other) => {
                        return Err(ShapeViolation::NotANumber {
                            field,
                            found: json_type_name(other),
                        });
                    }
                },
                FieldRule::Present(field) => {
                    if map.get(field).is_none_or(Value::is_null) {
                        return Err(ShapeViolation::MissingField(field));
                    }
                }
                FieldRule::AnyOf(fields) => {
                    let any = fields
                        .iter()
                        .any(|field| map.get(*field).is_some_and(|value| !value.is_null()));
                    if !any {
                        return Err(ShapeViolation::NoneOf(fields));
                    }
                }
            }
        }

        Ok(())
    }
}

fn check_records(field: &'static str, value: &Value) -> Result<(), ShapeViolation> {
    let Value::Array(elements) = value else {
        return Err(ShapeViolation::NotASequence {
            field,
            found: json_type_name(value),
        });
    };
    match elements.iter().position(|element| !element.is_object()) {
        Some(index) => Err(ShapeViolation::NotARecord {
            field,
            index,
            found: json_type_name(&elements[index]),
        }),
        None => Ok(()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
