//! Parameter file loading

use crate::{
    actions::{ExternalParameterSet, Parameter},
    error::{ExtractError, Result},
    substitution::PathResolver,
};
use serde_yaml::Value;
use std::{fs, path::Path};

/// Parameters contributed by a `<rosparam>` found in `origin`.
///
/// Only `command="load"` sets contribute; anything else yields nothing.
pub fn load_parameters(
    set: &ExternalParameterSet,
    resolver: &PathResolver,
    origin: &Path,
) -> Result<Vec<Parameter>> {
    if !set.is_load() {
        log::debug!(
            "Skipping rosparam '{}' with command '{}' in {}",
            set.file,
            set.command,
            origin.display()
        );
        return Ok(Vec::new());
    }

    let resolved = resolver.resolve(&set.file, origin)?;
    load_param_file(Path::new(&resolved), &set.parent)
}

/// Load a YAML parameter file, one parameter per top-level key
pub fn load_param_file(path: &Path, parent: &str) -> Result<Vec<Parameter>> {
    let content = fs::read_to_string(path).map_err(|source| ExtractError::ExternalFile {
        path: path.to_path_buf(),
        source,
    })?;

    let params = parse_param_mapping(&content, parent).map_err(|message| {
        ExtractError::ExternalFormat {
            path: path.to_path_buf(),
            message,
        }
    })?;

    log::debug!("Loaded {} parameters from {}", params.len(), path.display());
    Ok(params)
}

/// Turn the top level of a YAML mapping into parameters, keeping key order.
///
/// Nested values are not flattened; they are kept as a single JSON string.
pub fn parse_param_mapping(
    content: &str,
    parent: &str,
) -> std::result::Result<Vec<Parameter>, String> {
    let mut yaml: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    yaml.apply_merge().map_err(|e| e.to_string())?;

    match yaml {
        Value::Mapping(map) => Ok(map
            .iter()
            .map(|(key, value)| {
                Parameter::external(parent, value_to_string(key), value_to_string(value))
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(format!("expected a mapping, found {}", kind_name(&other))),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
