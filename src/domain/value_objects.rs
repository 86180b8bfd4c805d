use serde::{Deserialize, Serialize};

use crate::domain::candidate::Candidate;

/// One axis along which candidates can be narrowed.
///
/// Each variant knows which [`Candidate`] field it reads and which CLI flag
/// constrains it, so filters never look fields up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Account,
    App,
    Environment,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Account, Dimension::App, Dimension::Environment];

    /// The candidate field this dimension filters on.
    pub fn field<'a>(&self, candidate: &'a Candidate) -> &'a str {
        match self {
            Dimension::Account => &candidate.account_name,
            Dimension::App => &candidate.app_name,
            Dimension::Environment => &candidate.environment_name,
        }
    }

    /// Long flag name used in remediation hints (`--account`, `--app`, ...).
    pub fn flag(&self) -> &'static str {
        match self {
            Dimension::Account => "account",
            Dimension::App => "app",
            Dimension::Environment => "environment",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dimension::Account => "account",
            Dimension::App => "application",
            Dimension::Environment => "environment",
        };
        f.write_str(name)
    }
}
