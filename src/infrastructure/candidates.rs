use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::candidate::Candidate;
use crate::domain::ports::CandidateProvider;

/// Reads the visible app environments from a JSON file.
///
/// Accepts either a bare array of records or the API envelope
/// `{"app_environments": [...]}`.
pub struct JsonFileCandidateProvider {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Envelope { app_environments: Vec<Candidate> },
    List(Vec<Candidate>),
}

impl JsonFileCandidateProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CandidateProvider for JsonFileCandidateProvider {
    async fn app_environments(&self) -> Result<Vec<Candidate>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read candidates file: {}", self.path.display()))?;

        let candidates = parse_candidates(&content)
            .with_context(|| format!("Invalid candidates file: {}", self.path.display()))?;

        debug!(
            "Loaded {} app environments from {}",
            candidates.len(),
            self.path.display()
        );
        Ok(candidates)
    }
}

/// Parse and validate a candidates document.
///
/// Every record must carry non-empty account, app and environment names.
pub fn parse_candidates(content: &str) -> Result<Vec<Candidate>> {
    let document: Document =
        serde_json::from_str(content).context("Failed to parse candidates JSON")?;

    let candidates = match document {
        Document::Envelope { app_environments } => app_environments,
        Document::List(list) => list,
    };

    if let Some((idx, _)) = candidates.iter().enumerate().find(|(_, c)| !c.is_complete()) {
        bail!(
            "record #{} is missing an account, app or environment name",
            idx + 1
        );
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_bare_list_with_api_field_names() {
        let candidates = parse_candidates(
            r#"[
                {"account": "acme", "app": "blog", "environment": "production",
                 "repository_uri": "git@h:acme/blog.git"},
                {"account": "acme", "app": "blog", "environment": "staging"}
            ]"#,
        )
        .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].repository_uri, "git@h:acme/blog.git");
        assert_eq!(candidates[1].repository_uri, "");
    }

    #[test]
    fn parses_envelope_with_long_field_names() {
        let candidates = parse_candidates(
            r#"{"app_environments": [
                {"account_name": "acme", "app_name": "blog", "environment_name": "production"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            candidates,
            vec![Candidate::new("acme", "blog", "production", "")]
        );
    }

    #[test]
    fn rejects_records_with_empty_names() {
        let err = parse_candidates(r#"[{"account": "acme", "app": "", "environment": "production"}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("record #1"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_candidates("{not json").is_err());
    }

    #[tokio::test]
    async fn reads_candidates_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"account": "acme", "app": "blog", "environment": "production"}}]"#
        )
        .unwrap();

        let provider = JsonFileCandidateProvider::new(file.path());
        let candidates = provider.app_environments().await.unwrap();
        assert_eq!(candidates[0].app_name, "blog");
    }

    #[tokio::test]
    async fn missing_file_reports_its_path() {
        let provider = JsonFileCandidateProvider::new("/nonexistent/app_environments.json");
        let err = provider.app_environments().await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/app_environments.json"));
    }
}
