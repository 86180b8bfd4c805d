use anyhow::Result;

use crate::domain::{candidate::ResolvedTarget, ports::OutputWriter};

/// Pretty JSON using the API field names (`account`, `app`, `environment`).
pub struct JsonWriter;

impl OutputWriter for JsonWriter {
    fn format(&self, target: ResolvedTarget<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&target)?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::{Candidate, EnvironmentRef};
    use serde_json::{json, Value};

    #[test]
    fn app_environment_uses_api_field_names() {
        let c = Candidate::new("acme", "blog", "production", "");
        let out = JsonWriter.format(ResolvedTarget::AppEnvironment(&c)).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({"account": "acme", "app": "blog", "environment": "production", "repository_uri": ""})
        );
    }

    #[test]
    fn environment_has_no_app_field() {
        let e = EnvironmentRef {
            account_name: "acme".into(),
            environment_name: "staging".into(),
        };
        let out = JsonWriter.format(ResolvedTarget::Environment(&e)).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!({"account": "acme", "environment": "staging"}));
    }
}
