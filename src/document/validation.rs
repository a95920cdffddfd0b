use super::types::{DeploymentSet, DeploymentTarget};
use super::DocumentError;
use serde_yaml::Value;
use tracing::{debug, info};

/// Fields every deployment record must carry, in check order
pub const REQUIRED_FIELDS: [&str; 3] = ["deployment", "container", "image"];

/// Parse YAML text into a generic document
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    info!(yaml = %text, "Received YAML input");

    let value: Value = serde_yaml::from_str(text)?;

    match serde_json::to_string_pretty(&value) {
        Ok(json) => debug!(document = %json, "Parsed YAML input"),
        Err(_) => debug!(document = ?value, "Parsed YAML input"),
    }

    Ok(value)
}

/// Validate a parsed document and convert it into a [`DeploymentSet`]
///
/// # Validation Rules
/// - The document must be a mapping
/// - `namespace` must be a string with at least one non-whitespace character
/// - `deployments` must be a non-empty list (absent counts as empty)
/// - Every record must be a mapping with non-blank string `deployment`,
///   `container` and `image` fields; other keys are ignored
/// - `status` is optional and never fatal; see [`status_flag`]
///
/// The first violation is returned. Accepted values are kept verbatim.
pub fn validate_document(document: &Value) -> Result<DeploymentSet, DocumentError> {
    if !document.is_mapping() {
        return Err(DocumentError::NotAMapping);
    }

    let namespace = document
        .get("namespace")
        .and_then(non_blank_str)
        .ok_or(DocumentError::InvalidNamespace)?;

    let records: &[Value] = match document.get("deployments") {
        None => &[],
        Some(value) => value
            .as_sequence()
            .map(Vec::as_slice)
            .ok_or(DocumentError::InvalidDeployments)?,
    };
    if records.is_empty() {
        return Err(DocumentError::InvalidDeployments);
    }

    let deployments = records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    let status = document.get("status").is_some_and(status_flag);

    Ok(DeploymentSet {
        namespace: namespace.to_string(),
        deployments,
        status,
    })
}

fn validate_record(index: usize, record: &Value) -> Result<DeploymentTarget, DocumentError> {
    if !record.is_mapping() {
        return Err(DocumentError::RecordNotAMapping { index });
    }

    let [deployment, container, image] = REQUIRED_FIELDS.map(|field| {
        record
            .get(field)
            .and_then(non_blank_str)
            .ok_or(DocumentError::InvalidField { index, field })
    });

    Ok(DeploymentTarget {
        deployment: deployment?.to_string(),
        container: container?.to_string(),
        image: image?.to_string(),
    })
}

/// Interpret a `status` value as a flag
///
/// YAML 1.1 boolean spellings (`yes`/`no`, `on`/`off`, `y`/`n`, `true`/`false`,
/// any case) are honoured since serde_yaml only resolves `true`/`false`.
/// Anything else is truthy when non-empty or non-zero.
pub fn status_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "no" | "n" | "off" | "false" => false,
            _ => true,
        },
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => status_flag(&tagged.value),
    }
}

fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "validation_test.rs"]
mod tests;
