use canonical_json::to_string;
use serde::Serialize;
use serde_json::Value;

use crate::path::FieldPath;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// The value could not be converted to JSON.
    #[error("value is not representable as JSON: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

/// Produces RFC 8785 canonical bytes (stable key order, minimal whitespace).
///
/// Two trees are considered equal by the reconciler exactly when their
/// canonical bytes are equal, so every comparison in the workspace goes
/// through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    /// Creates a new canonicalizer.
    pub fn new() -> Self {
        Self
    }

    /// Produces canonical bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        self.check(value, &FieldPath::root())?;
        let canonical = to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    /// Serializes any value to JSON first, then canonicalizes it.
    pub fn canonicalize_serialize<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, CanonicalizationError> {
        let value = serde_json::to_value(value)?;
        self.canonicalize(&value)
    }

    #[allow(clippy::only_used_in_recursion)]
    fn check(&self, value: &Value, path: &FieldPath) -> Result<(), CanonicalizationError> {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    self.check(child, &path.child(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for item in items {
                    self.check(item, path)?;
                }
                Ok(())
            }
            Value::Number(num) => match num.as_f64() {
                Some(f) if num.is_f64() && !f.is_finite() => {
                    Err(CanonicalizationError::NonFiniteNumber(path.to_string()))
                }
                _ => Ok(()),
            },
            Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}
