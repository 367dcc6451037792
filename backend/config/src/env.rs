//! `${VAR}` substitution in config string values.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are recognized, and `$${…}`
//! escapes down to a literal `${…}`. Unset or empty variables fail the
//! load with the config path that referenced them.

use std::collections::HashMap;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Matches `${NAME}` with an optional escape marker (`$${NAME}`).
static VAR_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\$?)\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Environment variable \"{var_name}\" is not set (referenced at {config_path})")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute references throughout a config value tree using the
/// process environment.
pub fn resolve_references(value: &Value) -> Result<Value> {
    resolve_references_with(value, &std::env::vars().collect())
}

/// Same as [`resolve_references`] with an explicit variable map.
pub fn resolve_references_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    resolve_value(value, env, "")
}

fn resolve_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(items) => {
            let resolved: Result<Vec<_>> = items
                .iter()
                .enumerate()
                .map(|(i, item)| resolve_value(item, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(resolved?))
        }
        Value::Object(map) => {
            let mut resolved = serde_json::Map::new();
            for (key, item) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                resolved.insert(key.clone(), resolve_value(item, env, &child_path)?);
            }
            Ok(Value::Object(resolved))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = VAR_REFERENCE.replace_all(s, |caps: &regex::Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            // Escaped reference stays literal.
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => {
                if missing.is_none() {
                    missing = Some(MissingEnvVarError {
                        var_name: name.to_string(),
                        config_path: path.to_string(),
                    });
                }
                String::new()
            }
        }
    });

    match missing {
        Some(err) => bail!(err),
        None => Ok(substituted.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_string_leaf() {
        let value = json!({ "api": { "geminiApiKey": "${GEMINI_API_KEY}" } });
        let resolved =
            resolve_references_with(&value, &env(&[("GEMINI_API_KEY", "AIza-test")])).unwrap();
        assert_eq!(resolved["api"]["geminiApiKey"], "AIza-test");
    }

    #[test]
    fn test_missing_variable_names_config_path() {
        let value = json!({ "api": { "geminiApiKey": "${NOT_SET}" } });
        let err = resolve_references_with(&value, &HashMap::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("NOT_SET"));
        assert!(message.contains("api.geminiApiKey"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let value = json!({ "key": "${EMPTY_VAR}" });
        let result = resolve_references_with(&value, &env(&[("EMPTY_VAR", "")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_escape_produces_literal() {
        let value = json!({ "note": "costs $${PRICE} today" });
        let resolved = resolve_references_with(&value, &HashMap::new()).unwrap();
        assert_eq!(resolved["note"], "costs ${PRICE} today");
    }

    #[test]
    fn test_lowercase_names_are_not_references() {
        let value = json!({ "note": "${not_a_var}" });
        let resolved = resolve_references_with(&value, &HashMap::new()).unwrap();
        assert_eq!(resolved["note"], "${not_a_var}");
    }

    #[test]
    fn test_non_strings_pass_through() {
        let value = json!({ "render": { "color": true }, "count": 3 });
        let resolved = resolve_references_with(&value, &HashMap::new()).unwrap();
        assert_eq!(resolved, value);
    }
}
