use crate::domain::candidate::Candidate;
use crate::domain::ports::CandidateProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

// ─── MonitoringCandidateProvider ─────────────────────────────────────────────

/// Decorator: wraps any `CandidateProvider`, measures wall time per
/// `app_environments` call and logs how many associations came back.
pub struct MonitoringCandidateProvider {
    inner: Arc<dyn CandidateProvider>,
}

impl MonitoringCandidateProvider {
    pub fn new(inner: Arc<dyn CandidateProvider>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CandidateProvider for MonitoringCandidateProvider {
    #[instrument(name = "app_environments", skip(self), level = "info")]
    async fn app_environments(&self) -> Result<Vec<Candidate>> {
        let start = Instant::now();
        let candidates = self.inner.app_environments().await?;
        let duration_ms = start.elapsed().as_millis();

        let incomplete = candidates.iter().filter(|c| !c.is_complete()).count();
        info!(
            candidates = candidates.len(),
            incomplete,
            duration_ms,
            "app_environments fetched"
        );

        Ok(candidates)
    }
}
