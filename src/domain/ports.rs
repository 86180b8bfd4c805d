use crate::domain::candidate::{Candidate, ResolvedTarget};
use anyhow::Result;
use async_trait::async_trait;

/// Port: the caller's visible (account, app, environment) associations
/// (implemented by JsonFileCandidateProvider, StaticCandidates)
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    async fn app_environments(&self) -> Result<Vec<Candidate>>;
}

/// Port: git remotes of the working directory (implemented by GitRemoteSource)
///
/// `Ok(None)` means no repository is present.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn remotes(&self) -> Result<Option<Vec<String>>>;
}

/// Port: remote URI equivalence (implemented by NormalizedRemoteMatcher)
pub trait RemoteMatcher: Send + Sync {
    /// Whether a candidate's `repository_uri` points at the same repository as `remote`.
    fn matches(&self, repository_uri: &str, remote: &str) -> bool;
}

/// Port: output formatting of a resolved target (implemented by TextWriter, JsonWriter)
pub trait OutputWriter: Send + Sync {
    fn format(&self, target: ResolvedTarget<'_>) -> Result<String>;
    /// Name accepted by `--format`.
    fn name(&self) -> &'static str;
}
