//! Construction of containers from untyped JSON and TOML documents.
//!
//! Tables become parameter sets. A nested table carrying a string
//! [`MODULE_NAME_KEY`] becomes a module, and an array made only of such
//! tables becomes a sequence. Arrays of scalars become lists. Anything else
//! (nulls, datetimes, nested or mixed arrays) is rejected as an invalid
//! argument.

use steer_core::errors::{ErrorInfo, SteerError};

use crate::module::Module;
use crate::parameters::Parameters;
use crate::sequence::Sequence;
use crate::value::{Scalar, Value};

/// Reserved table key holding the name of a module.
pub const MODULE_NAME_KEY: &str = "mod_name";

fn invalid(code: &str, message: impl Into<String>, path: &str) -> SteerError {
    SteerError::InvalidArgument(ErrorInfo::new(code, message).with_context("path", path))
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

impl Parameters {
    /// Builds a set from an untyped JSON object.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, SteerError> {
        match value {
            serde_json::Value::Object(map) => json_table(map, ""),
            other => Err(invalid(
                "not-an-object",
                format!("expected a JSON object, found {}", json_kind(other)),
                "",
            )),
        }
    }

    /// Parses `json` and builds a set from the resulting object.
    pub fn from_json_str(json: &str) -> Result<Self, SteerError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| SteerError::serde("decode-json", err.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Builds a set from a JSON array of `[key, value]` pairs; later pairs
    /// override earlier ones.
    pub fn from_pairs(value: &serde_json::Value) -> Result<Self, SteerError> {
        let items = value.as_array().ok_or_else(|| {
            invalid(
                "not-a-pair-list",
                format!("expected an array of pairs, found {}", json_kind(value)),
                "",
            )
        })?;
        let mut params = Parameters::new();
        for (idx, item) in items.iter().enumerate() {
            let (key, entry) = match item.as_array().map(Vec::as_slice) {
                Some([serde_json::Value::String(key), entry]) => (key, entry),
                _ => {
                    return Err(invalid(
                        "not-a-pair",
                        "expected a two-element [string, value] array",
                        &format!("[{idx}]"),
                    ))
                }
            };
            params.set(key.as_str(), json_value(entry, key)?);
        }
        Ok(params)
    }

    /// Parses a TOML document and builds a set from its root table.
    pub fn from_toml_str(source: &str) -> Result<Self, SteerError> {
        let table: toml::Table = source
            .parse()
            .map_err(|err: toml::de::Error| SteerError::serde("decode-toml", err.to_string()))?;
        toml_table(&table, "")
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn json_table(
    map: &serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> Result<Parameters, SteerError> {
    let mut params = Parameters::new();
    for (key, value) in map {
        params.set(key.as_str(), json_value(value, &child_path(path, key))?);
    }
    Ok(params)
}

fn json_module_name<'a>(
    map: &'a serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> Result<Option<&'a str>, SteerError> {
    match map.get(MODULE_NAME_KEY) {
        None => Ok(None),
        Some(serde_json::Value::String(name)) => Ok(Some(name)),
        Some(other) => Err(invalid(
            "module-name",
            format!("module name must be a string, found {}", json_kind(other)),
            path,
        )),
    }
}

fn json_scalar(value: &serde_json::Value) -> Option<Scalar> {
    match value {
        serde_json::Value::Bool(flag) => Some(Scalar::Bool(*flag)),
        serde_json::Value::Number(number) => number
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| number.as_f64().map(Scalar::Float)),
        serde_json::Value::String(text) => Some(Scalar::Str(text.clone())),
        _ => None,
    }
}

fn json_value(value: &serde_json::Value, path: &str) -> Result<Value, SteerError> {
    if let Some(scalar) = json_scalar(value) {
        return Ok(Value::Scalar(scalar));
    }
    match value {
        serde_json::Value::Object(map) => {
            let name = json_module_name(map, path)?;
            let mut params = json_table(map, path)?;
            Ok(match name {
                Some(name) => {
                    params.remove(MODULE_NAME_KEY);
                    Value::Module(Module::with_params(name, params))
                }
                None => Value::Params(params),
            })
        }
        serde_json::Value::Array(items) => json_array(items, path),
        _ => Err(invalid("null-value", "null is not a parameter value", path)),
    }
}

fn json_array(items: &[serde_json::Value], path: &str) -> Result<Value, SteerError> {
    let all_modules = !items.is_empty()
        && items.iter().all(|item| {
            item.as_object()
                .is_some_and(|map| map.contains_key(MODULE_NAME_KEY))
        });
    if all_modules {
        let mut sequence = Sequence::new();
        for (idx, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{idx}]");
            if let Value::Module(module) = json_value(item, &item_path)? {
                sequence.push(module);
            }
        }
        return Ok(Value::Sequence(sequence));
    }
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            json_scalar(item).ok_or_else(|| {
                invalid(
                    "mixed-array",
                    format!("list items must be scalars, found {}", json_kind(item)),
                    &format!("{path}[{idx}]"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn toml_kind(value: &toml::Value) -> &'static str {
    value.type_str()
}

fn toml_table(table: &toml::Table, path: &str) -> Result<Parameters, SteerError> {
    let mut params = Parameters::new();
    for (key, value) in table {
        params.set(key.as_str(), toml_value(value, &child_path(path, key))?);
    }
    Ok(params)
}

fn toml_scalar(value: &toml::Value) -> Option<Scalar> {
    match value {
        toml::Value::Boolean(flag) => Some(Scalar::Bool(*flag)),
        toml::Value::Integer(number) => Some(Scalar::Int(*number)),
        toml::Value::Float(number) => Some(Scalar::Float(*number)),
        toml::Value::String(text) => Some(Scalar::Str(text.clone())),
        _ => None,
    }
}

fn toml_value(value: &toml::Value, path: &str) -> Result<Value, SteerError> {
    if let Some(scalar) = toml_scalar(value) {
        return Ok(Value::Scalar(scalar));
    }
    match value {
        toml::Value::Table(table) => {
            let name = match table.get(MODULE_NAME_KEY) {
                None => None,
                Some(toml::Value::String(name)) => Some(name.as_str()),
                Some(other) => {
                    return Err(invalid(
                        "module-name",
                        format!("module name must be a string, found {}", toml_kind(other)),
                        path,
                    ))
                }
            };
            let mut params = toml_table(table, path)?;
            Ok(match name {
                Some(name) => {
                    params.remove(MODULE_NAME_KEY);
                    Value::Module(Module::with_params(name, params))
                }
                None => Value::Params(params),
            })
        }
        toml::Value::Array(items) => toml_array(items, path),
        other => Err(invalid(
            "unsupported-value",
            format!("{} is not a parameter value", toml_kind(other)),
            path,
        )),
    }
}

fn toml_array(items: &[toml::Value], path: &str) -> Result<Value, SteerError> {
    let all_modules = !items.is_empty()
        && items.iter().all(|item| {
            item.as_table()
                .is_some_and(|table| table.contains_key(MODULE_NAME_KEY))
        });
    if all_modules {
        let mut sequence = Sequence::new();
        for (idx, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{idx}]");
            if let Value::Module(module) = toml_value(item, &item_path)? {
                sequence.push(module);
            }
        }
        return Ok(Value::Sequence(sequence));
    }
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            toml_scalar(item).ok_or_else(|| {
                invalid(
                    "mixed-array",
                    format!("list items must be scalars, found {}", toml_kind(item)),
                    &format!("{path}[{idx}]"),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}
