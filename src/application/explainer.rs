use std::collections::BTreeSet;

use crate::application::filter::{select, DimensionFilters};
use crate::domain::{
    candidate::{Candidate, EnvironmentRef},
    constraints::Constraints,
    diagnosis::{AppEnvironments, AppLookup, Diagnosis},
    value_objects::Dimension,
};

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostic Explainer
// ─────────────────────────────────────────────────────────────────────────────

/// Explain why `survivors` is not exactly one candidate.
///
/// Dispatches to [`explain_no_match`] for an empty intersection and to
/// [`explain_ambiguous`] otherwise.
pub fn explain(
    constraints: &Constraints,
    filters: &DimensionFilters<'_>,
    survivors: &[&Candidate],
) -> Diagnosis {
    if survivors.is_empty() {
        explain_no_match(constraints, filters)
    } else {
        explain_ambiguous(survivors)
    }
}

/// Find the first dimension responsible for an empty intersection.
///
/// # Precedence
/// 0. Nothing visible at all → no application.
/// 1. Account constrained and empty → no account.
/// 2. App dimension (name or repository) empty → no application.
/// 3. Environment constrained and empty → no environment.
/// 4. Account and environment both constrained, but the environment never
///    appears under the surviving accounts → environment on another account.
/// 5. Otherwise → mismatch, listing the valid environments per surviving app.
///
/// Upstream dimensions were filtered against the full set, so the first
/// empty one is the most useful root cause.
pub fn explain_no_match(constraints: &Constraints, filters: &DimensionFilters<'_>) -> Diagnosis {
    let all: Vec<&Candidate> = filters.all.iter().collect();

    if all.is_empty() {
        return no_application(constraints, &all);
    }

    if let (Some(account_name), Some(by_account)) = (
        constraints.target(Dimension::Account),
        filters.by_account.as_ref(),
    ) {
        if by_account.is_empty() {
            return Diagnosis::NoAccount {
                account_name: account_name.to_string(),
                available: distinct_sorted(&all, Dimension::Account),
            };
        }
    }

    let app_set = filters.app_set();
    if app_set.is_empty() {
        return no_application(constraints, &all);
    }

    let environment_name = constraints.target(Dimension::Environment);
    if let (Some(environment_name), Some(by_environment)) =
        (environment_name, filters.by_environment.as_ref())
    {
        if by_environment.is_empty() {
            return Diagnosis::NoEnvironment {
                environment_name: environment_name.to_string(),
                available: distinct_sorted(&all, Dimension::Environment),
            };
        }
    }

    if let (Some(account_name), Some(environment_name)) =
        (constraints.target(Dimension::Account), environment_name)
    {
        let under_account = select(
            &filters.account_set(),
            Dimension::Environment,
            Some(environment_name),
        );
        if under_account.map_or(false, |set| set.is_empty()) {
            return Diagnosis::EnvironmentOnOtherAccount {
                environment_name: environment_name.to_string(),
                account_name: account_name.to_string(),
                found: distinct_environments(&filters.environment_set()),
            };
        }
    }

    let applications = group_by_app(&app_set)
        .into_iter()
        .map(|group| {
            let rows: Vec<&Candidate> = all
                .iter()
                .copied()
                .filter(|c| c.account_name == group.account_name && c.app_name == group.app_name)
                .collect();
            summarize(&group.account_name, &group.app_name, &rows)
        })
        .collect();

    Diagnosis::Mismatch { applications }
}

/// Several triples survived: group them by (account, app) in provider order,
/// with each group's environments sorted. Records that differ only by
/// repository report those repositories, since no flag separates them.
pub fn explain_ambiguous(survivors: &[&Candidate]) -> Diagnosis {
    Diagnosis::MultipleAppEnvironments {
        applications: group_by_app(survivors),
    }
}

/// Several (account, environment) pairs survived an environment-only resolution.
pub fn explain_ambiguous_environments(
    constraints: &Constraints,
    environments: &[EnvironmentRef],
) -> Diagnosis {
    Diagnosis::MultipleEnvironments {
        environment_name: constraints
            .target(Dimension::Environment)
            .map(str::to_string),
        environments: environments.to_vec(),
    }
}

// ─── Helpers ───

fn no_application(constraints: &Constraints, all: &[&Candidate]) -> Diagnosis {
    let lookup = if let Some(app_name) = constraints.target(Dimension::App) {
        AppLookup::Named(app_name.to_string())
    } else if let Some(remotes) = constraints.remotes() {
        AppLookup::Remotes(remotes.iter().cloned().collect())
    } else {
        AppLookup::Unconstrained
    };

    Diagnosis::NoApplication {
        lookup,
        available: distinct_sorted(all, Dimension::App),
    }
}

/// Distinct values of `dimension`, sorted.
fn distinct_sorted(candidates: &[&Candidate], dimension: Dimension) -> Vec<String> {
    candidates
        .iter()
        .map(|c| dimension.field(c))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct (account, environment) pairs in first-seen order.
pub(crate) fn distinct_environments(candidates: &[&Candidate]) -> Vec<EnvironmentRef> {
    let mut pairs: Vec<EnvironmentRef> = Vec::new();
    for candidate in candidates {
        let pair = candidate.environment_ref();
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    pairs
}

fn group_by_app(candidates: &[&Candidate]) -> Vec<AppEnvironments> {
    let mut groups: Vec<(&str, &str, Vec<&Candidate>)> = Vec::new();

    for c in candidates {
        match groups
            .iter_mut()
            .find(|(account, app, _)| *account == c.account_name && *app == c.app_name)
        {
            Some((_, _, rows)) => rows.push(*c),
            None => groups.push((c.account_name.as_str(), c.app_name.as_str(), vec![*c])),
        }
    }

    groups
        .into_iter()
        .map(|(account_name, app_name, rows)| summarize(account_name, app_name, &rows))
        .collect()
}

fn summarize(account_name: &str, app_name: &str, rows: &[&Candidate]) -> AppEnvironments {
    let environments = distinct_sorted(rows, Dimension::Environment);
    let shared_repositories: Vec<String> = environments
        .iter()
        .map(|env| {
            rows.iter()
                .filter(|c| c.environment_name == *env)
                .map(|c| c.repository_uri.as_str())
                .collect::<BTreeSet<_>>()
        })
        .filter(|repos| repos.len() > 1)
        .flatten()
        .filter(|repo| !repo.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    AppEnvironments {
        account_name: account_name.to_string(),
        app_name: app_name.to_string(),
        environments,
        shared_repositories,
    }
}
