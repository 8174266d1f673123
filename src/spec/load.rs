use super::types::{OperationDescriptor, OperationMetadata};
use anyhow::{bail, Context};
use http::Method;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const METHODS: [(&str, Method); 8] = [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
];

fn method_for_key(key: &str) -> Option<Method> {
    METHODS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, method)| method.clone())
}

/// Read a YAML or JSON API document and list its operations.
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
pub fn load_operations(file_path: impl AsRef<Path>) -> anyhow::Result<Vec<OperationDescriptor>> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read API document {}", file_path.display()))?;
    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML {}", file_path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON {}", file_path.display()))?
    };
    operations_from_value(&value)
}

/// Extract operations from an already parsed API document.
///
/// Walks `paths.<template>.<method>`. Path-item keys that are not HTTP methods
/// (`parameters`, `summary`, `x-*`, ...) are skipped. A document without `paths`
/// yields no operations.
pub fn operations_from_value(document: &Value) -> anyhow::Result<Vec<OperationDescriptor>> {
    let Some(paths) = document.get("paths") else {
        return Ok(Vec::new());
    };
    let Some(paths) = paths.as_object() else {
        bail!("`paths` must be a mapping");
    };

    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            bail!("path item for {path} must be a mapping");
        };
        for (key, operation) in item {
            let Some(method) = method_for_key(key) else {
                continue;
            };
            let metadata: OperationMetadata = match operation {
                Value::Object(obj) => obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                Value::Null => OperationMetadata::new(),
                _ => bail!("operation {key} {path} must be a mapping"),
            };
            debug!(method = %method, path = %path, "Loaded operation");
            operations.push(OperationDescriptor {
                method,
                path: path.clone(),
                metadata,
            });
        }
    }
    Ok(operations)
}
