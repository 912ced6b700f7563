//! Secret payload validation
//!
//! A secret payload must be a flat JSON object mapping string keys to
//! non-empty scalar values. Anything else is rejected as a whole.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, SecretFormatError};

/// Validated key/value pairs of one secret
pub type SecretMap = BTreeMap<String, String>;

/// Parse a raw secret payload and check that every key carries a value
///
/// Numbers and booleans are accepted and kept in their JSON text form, so
/// `"port": 5432` yields `"5432"`. Fails with
/// [`SecretFormatError::InvalidSecretFormat`] if the payload is not a
/// non-empty JSON object of scalars, and with
/// [`SecretFormatError::MissingSecretValue`] naming the first key (in key
/// order) whose value is `null` or `""`. No partial map is returned.
pub fn parse_and_validate(payload: &str) -> Result<SecretMap> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(payload)
        .map_err(|e| SecretFormatError::InvalidSecretFormat(e.to_string()))?;

    if raw.is_empty() {
        return Err(SecretFormatError::InvalidSecretFormat("payload has no keys".into()).into());
    }

    let mut secrets = SecretMap::new();
    for (key, value) in raw {
        let value = match value {
            Value::String(value) if !value.is_empty() => value,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null | Value::String(_) => {
                return Err(SecretFormatError::MissingSecretValue { key }.into());
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(SecretFormatError::InvalidSecretFormat(format!(
                    "value for key '{key}' is not a string, number or boolean"
                ))
                .into());
            }
        };
        secrets.insert(key, value);
    }

    Ok(secrets)
}
