use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::explainer::{
    distinct_environments, explain, explain_ambiguous_environments, explain_no_match,
};
use crate::application::filter::DimensionFilters;
use crate::domain::{
    candidate::Candidate,
    constraints::Constraints,
    error::ConfigurationError,
    ports::RemoteMatcher,
    resolution::{EnvironmentOutcome, Resolution, ResolutionOutcome},
    value_objects::Dimension,
};
use crate::infrastructure::remote::NormalizedRemoteMatcher;

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Maps partial hints to exactly one candidate, or explains why it cannot.
///
/// Stateless: every call filters the candidates it is given and keeps
/// nothing afterwards, so one `Resolver` can be shared across threads.
///
/// # Algorithm
/// 1. Reject constraints with no discriminator at all.
/// 2. Filter the full set once per dimension (account, app or repository,
///    environment); an unconstrained dimension keeps everything.
/// 3. Intersect the three subsets.
/// 4. One survivor resolves; zero or several go to the explainer.
pub struct Resolver {
    matcher: Arc<dyn RemoteMatcher>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(NormalizedRemoteMatcher))
    }
}

impl Resolver {
    pub fn new(matcher: Arc<dyn RemoteMatcher>) -> Self {
        Self { matcher }
    }

    /// Resolve a single (account, app, environment) triple.
    #[instrument(
        name = "resolve",
        skip(self, candidates, constraints),
        fields(candidates = candidates.len()),
        level = "debug"
    )]
    pub fn resolve(
        &self,
        candidates: &[Candidate],
        constraints: &Constraints,
    ) -> Result<ResolutionOutcome, ConfigurationError> {
        if !constraints.has_discriminator() {
            return Err(ConfigurationError::NoDiscriminators);
        }

        let filters = DimensionFilters::compute(candidates, constraints, self.matcher.as_ref());
        let survivors = filters.intersection();
        debug!(survivors = survivors.len(), "intersected dimension filters");

        Ok(match survivors.len() {
            1 => Resolution::Resolved(survivors[0].clone()),
            0 => Resolution::NoMatch(explain(constraints, &filters, &survivors)),
            _ => {
                let diagnosis = explain(constraints, &filters, &survivors);
                Resolution::Ambiguous(survivors.into_iter().cloned().collect(), diagnosis)
            }
        })
    }

    /// Resolve a single (account, environment) pair, ignoring which app it
    /// belongs to. An app name is not accepted here; git remotes still narrow
    /// the candidates.
    #[instrument(
        name = "resolve_environment_only",
        skip(self, candidates, constraints),
        fields(candidates = candidates.len()),
        level = "debug"
    )]
    pub fn resolve_environment_only(
        &self,
        candidates: &[Candidate],
        constraints: &Constraints,
    ) -> Result<EnvironmentOutcome, ConfigurationError> {
        if constraints.target(Dimension::App).is_some() {
            return Err(ConfigurationError::AppNameNotAllowed);
        }
        if !constraints.has_discriminator() {
            return Err(ConfigurationError::NoDiscriminators);
        }

        let filters = DimensionFilters::compute(candidates, constraints, self.matcher.as_ref());
        let mut environments = distinct_environments(&filters.intersection());
        debug!(
            environments = environments.len(),
            "grouped survivors by account and environment"
        );

        Ok(match environments.len() {
            0 => Resolution::NoMatch(explain_no_match(constraints, &filters)),
            1 => Resolution::Resolved(environments.remove(0)),
            _ => {
                let diagnosis = explain_ambiguous_environments(constraints, &environments);
                Resolution::Ambiguous(environments, diagnosis)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::EnvironmentRef;
    use crate::domain::diagnosis::{AppLookup, Diagnosis};

    fn env(account: &str, app: &str, environment: &str, repo: &str) -> Candidate {
        Candidate::new(account, app, environment, repo)
    }

    fn resolve(all: &[Candidate], constraints: Constraints) -> ResolutionOutcome {
        Resolver::default().resolve(all, &constraints).unwrap()
    }

    #[test]
    fn partial_environment_name_resolves() {
        let all = vec![env("acme", "blog", "production", "git@h:acme/blog.git")];
        let outcome = resolve(&all, Constraints::new().with_environment("prod"));
        assert_eq!(outcome, Resolution::Resolved(all[0].clone()));
    }

    #[test]
    fn exact_environment_wins_over_longer_name() {
        let all = vec![
            env("acme", "blog", "staging", ""),
            env("acme", "blog", "staging_production", ""),
            env("acme", "blog", "production", ""),
        ];
        let outcome = resolve(&all, Constraints::new().with_environment("production"));
        assert_eq!(outcome.resolved().unwrap().environment_name, "production");
    }

    #[test]
    fn same_app_on_two_accounts_is_ambiguous() {
        let all = vec![
            env("acme", "blog", "production", ""),
            env("other", "blog", "production", ""),
        ];
        let outcome = resolve(
            &all,
            Constraints::new().with_app("blog").with_environment("production"),
        );
        match outcome {
            Resolution::Ambiguous(candidates, diagnosis) => {
                assert_eq!(candidates, all);
                assert!(diagnosis.is_ambiguity());
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_set_blames_the_application() {
        let outcome = resolve(&[], Constraints::new().with_account("acme"));
        assert_eq!(
            outcome,
            Resolution::NoMatch(Diagnosis::NoApplication {
                lookup: AppLookup::Unconstrained,
                available: vec![],
            })
        );
    }

    #[test]
    fn unknown_account_is_named() {
        let all = vec![env("acme", "blog", "production", "")];
        let outcome = resolve(&all, Constraints::new().with_account("nonexistent"));
        let diagnosis = outcome.diagnosis().unwrap();
        assert_eq!(diagnosis.dimension(), Some(Dimension::Account));
        assert!(matches!(
            diagnosis,
            Diagnosis::NoAccount { account_name, .. } if account_name == "nonexistent"
        ));
    }

    #[test]
    fn no_discriminator_is_a_configuration_error() {
        let all = vec![env("acme", "blog", "production", "")];
        let err = Resolver::default()
            .resolve(&all, &Constraints::new().with_remotes(Vec::<String>::new()))
            .unwrap_err();
        assert_eq!(err, ConfigurationError::NoDiscriminators);
    }

    #[test]
    fn repository_remote_stands_in_for_app_name() {
        let all = vec![
            env("acme", "blog", "production", "git@github.com:acme/blog.git"),
            env("acme", "shop", "production", "git@github.com:acme/shop.git"),
        ];
        let outcome = resolve(
            &all,
            Constraints::new().with_remotes(["https://github.com/acme/shop.git"]),
        );
        assert_eq!(outcome.resolved().unwrap().app_name, "shop");
    }

    #[test]
    fn unconstrained_dimension_keeps_every_account() {
        let all = vec![
            env("acme", "blog", "production", ""),
            env("other", "blog", "production", ""),
        ];
        let outcome = resolve(&all, Constraints::new().with_app("blog"));
        assert_eq!(outcome.candidates().len(), 2);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let all = vec![
            env("other", "blog", "staging", ""),
            env("acme", "blog", "production", ""),
            env("acme", "blog", "staging", ""),
        ];
        let constraints = Constraints::new().with_app("blog");
        let first = resolve(&all, constraints.clone());
        let second = resolve(&all, constraints);
        assert_eq!(first, second);
    }

    // ── resolve_environment_only ──

    #[test]
    fn environment_only_rejects_app_name() {
        let all = vec![env("acme", "blog", "production", "")];
        let err = Resolver::default()
            .resolve_environment_only(&all, &Constraints::new().with_app("blog"))
            .unwrap_err();
        assert_eq!(err, ConfigurationError::AppNameNotAllowed);
    }

    #[test]
    fn environment_only_collapses_apps_sharing_an_environment() {
        let all = vec![
            env("acme", "blog", "production", ""),
            env("acme", "shop", "production", ""),
        ];
        let outcome = Resolver::default()
            .resolve_environment_only(&all, &Constraints::new().with_environment("production"))
            .unwrap();
        assert_eq!(
            outcome,
            Resolution::Resolved(EnvironmentRef {
                account_name: "acme".into(),
                environment_name: "production".into(),
            })
        );
    }

    #[test]
    fn environment_only_lists_distinct_pairs_when_ambiguous() {
        let all = vec![
            env("acme", "blog", "production", ""),
            env("other", "blog", "production", ""),
            env("acme", "shop", "production", ""),
        ];
        let outcome = Resolver::default()
            .resolve_environment_only(&all, &Constraints::new().with_environment("production"))
            .unwrap();
        match outcome {
            Resolution::Ambiguous(environments, Diagnosis::MultipleEnvironments { environment_name, .. }) => {
                let accounts: Vec<_> = environments.iter().map(|e| e.account_name.as_str()).collect();
                assert_eq!(accounts, vec!["acme", "other"]);
                assert_eq!(environment_name.as_deref(), Some("production"));
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn environment_only_ambiguity_from_remotes_has_no_environment_name() {
        let all = vec![
            env("acme", "blog", "production", "git@h:acme/blog.git"),
            env("acme", "blog", "staging", "git@h:acme/blog.git"),
        ];
        let outcome = Resolver::default()
            .resolve_environment_only(&all, &Constraints::new().with_remotes(["git@h:acme/blog.git"]))
            .unwrap();
        assert!(matches!(
            outcome.diagnosis(),
            Some(Diagnosis::MultipleEnvironments { environment_name: None, environments })
                if environments.len() == 2
        ));
    }

    #[test]
    fn environment_only_no_match_uses_the_same_precedence() {
        let all = vec![env("acme", "blog", "production", "")];
        let outcome = Resolver::default()
            .resolve_environment_only(&all, &Constraints::new().with_environment("qa"))
            .unwrap();
        assert_eq!(
            outcome.diagnosis().and_then(Diagnosis::dimension),
            Some(Dimension::Environment)
        );
    }

    #[test]
    fn full_flags_cannot_split_records_differing_only_by_repository() {
        let all = vec![
            env("acme", "blog", "production", "a"),
            env("acme", "blog", "production", "b"),
        ];
        let outcome = resolve(
            &all,
            Constraints::new()
                .with_account("acme")
                .with_app("blog")
                .with_environment("production"),
        );
        assert!(!outcome.is_resolved());
        match outcome.diagnosis() {
            Some(Diagnosis::MultipleAppEnvironments { applications }) => {
                assert_eq!(applications.len(), 1);
                assert_eq!(applications[0].shared_repositories, vec!["a", "b"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn single_survivor_is_resolved() {
        let all = vec![env("acme", "blog", "production", "")];
        assert!(resolve(&all, Constraints::new().with_app("blog")).is_resolved());
    }
}
