use kubectl_deploy::document::DeploymentSet;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    // Emits the JSON Schema of the YAML input document.
    // Use: cargo run --bin gen-schema > deployment-set.schema.json
    let mut schema = serde_json::to_value(schemars::schema_for!(DeploymentSet))?;

    // Empty lists and blank strings are rejected at runtime; mirror that here
    schema["properties"]["namespace"]["pattern"] = json!("\\S");
    schema["properties"]["deployments"]["minItems"] = json!(1);
    if let Some(target) = schema
        .pointer_mut("/$defs/DeploymentTarget/properties")
        .and_then(|p| p.as_object_mut())
    {
        for field in kubectl_deploy::document::REQUIRED_FIELDS {
            if let Some(property) = target.get_mut(field) {
                property["pattern"] = json!("\\S");
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
