use crate::domain::candidate::EnvironmentRef;
use crate::domain::value_objects::Dimension;

/// How the application dimension was being looked up when it came back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLookup {
    /// `--app` was given.
    Named(String),
    /// No app name; the working directory's git remotes drove the lookup.
    Remotes(Vec<String>),
    /// Neither an app name nor remotes were available.
    Unconstrained,
}

/// An application and the environments it is associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnvironments {
    pub account_name: String,
    pub app_name: String,
    /// Distinct environment names, sorted.
    pub environments: Vec<String>,
    /// Repositories behind environment names that occur more than once in
    /// the group. Flags cannot tell those records apart. Sorted; usually empty.
    pub shared_repositories: Vec<String>,
}

/// Structured explanation of a failed resolution.
///
/// Carries data only; turning it into remediation text is the job of
/// [`crate::presentation::diagnostic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// The account fragment matched nothing.
    NoAccount {
        account_name: String,
        /// Every distinct account visible to the caller, sorted.
        available: Vec<String>,
    },

    /// No application survived the name or repository lookup.
    NoApplication {
        lookup: AppLookup,
        /// Every distinct application name visible to the caller, sorted.
        available: Vec<String>,
    },

    /// The environment fragment matched nothing.
    NoEnvironment {
        environment_name: String,
        available: Vec<String>,
    },

    /// The environment exists, but never under the requested account.
    EnvironmentOnOtherAccount {
        environment_name: String,
        account_name: String,
        /// Where the environment does live.
        found: Vec<EnvironmentRef>,
    },

    /// Every dimension had survivors individually but no record satisfies
    /// all of them. Lists the valid combinations for the surviving apps.
    Mismatch { applications: Vec<AppEnvironments> },

    /// Several (account, app, environment) triples survived.
    MultipleAppEnvironments { applications: Vec<AppEnvironments> },

    /// Several (account, environment) pairs survived an environment-only
    /// resolution. `environment_name` is `None` when git remotes alone
    /// produced the ambiguity.
    MultipleEnvironments {
        environment_name: Option<String>,
        environments: Vec<EnvironmentRef>,
    },
}

impl Diagnosis {
    /// The single dimension held responsible, if there is one.
    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Diagnosis::NoAccount { .. } => Some(Dimension::Account),
            Diagnosis::NoApplication { .. } => Some(Dimension::App),
            Diagnosis::NoEnvironment { .. } | Diagnosis::EnvironmentOnOtherAccount { .. } => {
                Some(Dimension::Environment)
            }
            Diagnosis::Mismatch { .. }
            | Diagnosis::MultipleAppEnvironments { .. }
            | Diagnosis::MultipleEnvironments { .. } => None,
        }
    }

    /// `true` for the variants produced when more than one candidate survives.
    pub fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            Diagnosis::MultipleAppEnvironments { .. } | Diagnosis::MultipleEnvironments { .. }
        )
    }
}
