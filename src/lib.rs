use anyhow::Result;
use std::sync::Arc;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// ─── Log level ────────────────────────────────────────────────────────────────

/// Controls the verbosity of deploy-resolver's internal tracing output.
///
/// Pass to [`init_tracing`] before calling any async entry point.
///
/// | Variant | `tracing` level | When to use                                  |
/// |---------|-----------------|----------------------------------------------|
/// | `Error` | `error`         | `--quiet` / scripting                        |
/// | `Info`  | `info`          | Default, shows candidate fetch timing        |
/// | `Debug` | `debug`         | `--verbose`, shows filter and remote detail  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Info,
    Debug,
}

/// Initialise the global `tracing` subscriber for deploy-resolver.
///
/// Respects `RUST_LOG` when set, falling back to `level` otherwise. Logs go
/// to stderr so stdout stays clean for `--format json`.
///
/// Call this **once** at application startup. Library consumers who manage
/// their own subscriber should skip this.
///
/// Only available when the `cli` feature is enabled (pulls in
/// `tracing-subscriber`).
#[cfg(feature = "cli")]
pub fn init_tracing(level: LogLevel) {
    use tracing_subscriber::fmt::format::FmtSpan;

    let default_filter = match level {
        LogLevel::Error => "deploy_resolver=error",
        LogLevel::Info => "deploy_resolver=info",
        LogLevel::Debug => "deploy_resolver=debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

// ─── Public API Facade ───

pub use application::filter::{filter_by_repository, filter_dimension, DimensionFilters};
pub use application::monitoring::MonitoringCandidateProvider;
pub use application::resolver::Resolver;
pub use domain::candidate::{Candidate, EnvironmentRef, ResolvedTarget};
pub use domain::candidate_set::StaticCandidates;
pub use domain::constraints::Constraints;
pub use domain::diagnosis::{AppEnvironments, AppLookup, Diagnosis};
pub use domain::error::{ConfigurationError, ResolveError};
pub use domain::matching::{match_field, MatchKind};
pub use domain::ports::{CandidateProvider, RemoteMatcher, RemoteSource};
pub use domain::resolution::{EnvironmentOutcome, Resolution, ResolutionOutcome};
pub use domain::value_objects::Dimension;
pub use infrastructure::candidates::JsonFileCandidateProvider;
pub use infrastructure::config::{AppConfig, CandidatesConfig};
pub use infrastructure::git::GitRemoteSource;
pub use infrastructure::remote::NormalizedRemoteMatcher;
pub use presentation::diagnostic::{finish, render, RenderOptions};

// ─── Public entry points ───

/// Resolve one (account, app, environment) triple from in-memory candidates.
///
/// Shorthand for `Resolver::default().resolve(..)`.
pub fn resolve(
    candidates: &[Candidate],
    constraints: &Constraints,
) -> std::result::Result<ResolutionOutcome, ConfigurationError> {
    Resolver::default().resolve(candidates, constraints)
}

/// Resolve one (account, environment) pair from in-memory candidates.
pub fn resolve_environment_only(
    candidates: &[Candidate],
    constraints: &Constraints,
) -> std::result::Result<EnvironmentOutcome, ConfigurationError> {
    Resolver::default().resolve_environment_only(candidates, constraints)
}

/// Fetch the candidates and resolve an app environment.
///
/// The configured `default_environment` fills in a missing environment
/// constraint. A [`ConfigurationError`] comes back inside the `anyhow::Error`
/// and can be recovered with `downcast_ref`.
pub async fn run(
    cfg: &AppConfig,
    provider: Arc<dyn CandidateProvider>,
    constraints: Constraints,
) -> Result<ResolutionOutcome> {
    let constraints = constraints.or_default_environment(cfg.default_environment.as_deref());
    let candidates = fetch_candidates(provider).await?;
    Ok(Resolver::default().resolve(&candidates, &constraints)?)
}

/// Fetch the candidates and resolve an environment, whatever app it hosts.
pub async fn run_environment(
    cfg: &AppConfig,
    provider: Arc<dyn CandidateProvider>,
    constraints: Constraints,
) -> Result<EnvironmentOutcome> {
    let constraints = constraints.or_default_environment(cfg.default_environment.as_deref());
    let candidates = fetch_candidates(provider).await?;
    Ok(Resolver::default().resolve_environment_only(&candidates, &constraints)?)
}

/// Fetch the visible candidates through the monitoring decorator.
pub async fn fetch_candidates(provider: Arc<dyn CandidateProvider>) -> Result<Vec<Candidate>> {
    MonitoringCandidateProvider::new(provider)
        .app_environments()
        .await
}
