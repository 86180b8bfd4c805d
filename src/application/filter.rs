use std::collections::{BTreeSet, HashSet};

use crate::domain::{
    candidate::Candidate,
    constraints::Constraints,
    matching::{match_field, MatchKind},
    ports::RemoteMatcher,
    value_objects::Dimension,
};

// ─── Dimension Filter ───

/// Narrow `pool` on one dimension.
///
/// Returns `None` when `target` is absent (dimension unconstrained). Otherwise
/// returns the exact hits if there are any, else the partial hits, else an
/// empty vec. Exact hits always shadow substring hits, so a full name never
/// turns ambiguous because a longer name contains it.
pub fn select<'a>(
    pool: &[&'a Candidate],
    dimension: Dimension,
    target: Option<&str>,
) -> Option<Vec<&'a Candidate>> {
    let target = target.filter(|t| !t.trim().is_empty())?.to_lowercase();

    let exact = matching(pool, dimension, &target, MatchKind::Exact);
    if !exact.is_empty() {
        return Some(exact);
    }
    Some(matching(pool, dimension, &target, MatchKind::Partial))
}

/// [`select`] over a full candidate set.
pub fn filter_dimension<'a>(
    candidates: &'a [Candidate],
    dimension: Dimension,
    target: Option<&str>,
) -> Option<Vec<&'a Candidate>> {
    let pool: Vec<&Candidate> = candidates.iter().collect();
    select(&pool, dimension, target)
}

/// Keep candidates linked to any of `remotes`.
///
/// `None` when no remotes were supplied. An empty vec means remotes were
/// supplied but no candidate is linked to them.
pub fn filter_by_repository<'a>(
    candidates: &'a [Candidate],
    remotes: Option<&BTreeSet<String>>,
    matcher: &dyn RemoteMatcher,
) -> Option<Vec<&'a Candidate>> {
    let remotes = remotes.filter(|r| !r.is_empty())?;
    Some(
        candidates
            .iter()
            .filter(|c| remotes.iter().any(|r| matcher.matches(&c.repository_uri, r)))
            .collect(),
    )
}

fn matching<'a>(
    pool: &[&'a Candidate],
    dimension: Dimension,
    target: &str,
    kind: MatchKind,
) -> Vec<&'a Candidate> {
    pool.iter()
        .copied()
        .filter(|c| match_field(dimension.field(c), target) == kind)
        .collect()
}

// ─── Per-call filter results ───

/// The three dimension filters of one resolution, each computed once against
/// the full candidate set.
///
/// `None` means the dimension was unconstrained; the `*_set` accessors turn
/// that into the full set.
#[derive(Debug)]
pub struct DimensionFilters<'a> {
    pub all: &'a [Candidate],
    pub by_account: Option<Vec<&'a Candidate>>,
    /// App name filter, or the repository filter when no app name was given.
    pub by_app: Option<Vec<&'a Candidate>>,
    pub by_environment: Option<Vec<&'a Candidate>>,
}

impl<'a> DimensionFilters<'a> {
    pub fn compute(
        all: &'a [Candidate],
        constraints: &Constraints,
        matcher: &dyn RemoteMatcher,
    ) -> Self {
        let by_app = filter_dimension(all, Dimension::App, constraints.target(Dimension::App))
            .or_else(|| filter_by_repository(all, constraints.remotes(), matcher));

        Self {
            all,
            by_account: filter_dimension(
                all,
                Dimension::Account,
                constraints.target(Dimension::Account),
            ),
            by_app,
            by_environment: filter_dimension(
                all,
                Dimension::Environment,
                constraints.target(Dimension::Environment),
            ),
        }
    }

    pub fn account_set(&self) -> Vec<&'a Candidate> {
        self.or_all(&self.by_account)
    }

    pub fn app_set(&self) -> Vec<&'a Candidate> {
        self.or_all(&self.by_app)
    }

    pub fn environment_set(&self) -> Vec<&'a Candidate> {
        self.or_all(&self.by_environment)
    }

    /// `account ∩ app ∩ environment`, by record value, in provider order,
    /// without duplicates.
    pub fn intersection(&self) -> Vec<&'a Candidate> {
        let app: HashSet<&Candidate> = self.app_set().into_iter().collect();
        let environment: HashSet<&Candidate> = self.environment_set().into_iter().collect();
        let mut seen = HashSet::new();

        self.account_set()
            .into_iter()
            .filter(|c| app.contains(c) && environment.contains(c) && seen.insert(*c))
            .collect()
    }

    fn or_all(&self, set: &Option<Vec<&'a Candidate>>) -> Vec<&'a Candidate> {
        match set {
            Some(set) => set.clone(),
            None => self.all.iter().collect(),
        }
    }
}
