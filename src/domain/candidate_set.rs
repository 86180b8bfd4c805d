use anyhow::Result;
use async_trait::async_trait;

use crate::domain::candidate::Candidate;
use crate::domain::ports::CandidateProvider;

/// In-memory implementation of [`CandidateProvider`].
///
/// Handy for library callers that already fetched the associations, and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCandidates(Vec<Candidate>);

impl StaticCandidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }
}

#[async_trait]
impl CandidateProvider for StaticCandidates {
    async fn app_environments(&self) -> Result<Vec<Candidate>> {
        Ok(self.0.clone())
    }
}
