use crate::domain::candidate::{Candidate, EnvironmentRef};
use crate::domain::diagnosis::Diagnosis;

/// The outcome of one resolution attempt. The resolver never picks a
/// survivor on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Exactly one survivor.
    Resolved(T),

    /// Zero survivors.
    NoMatch(Diagnosis),

    /// More than one survivor. The list keeps provider order so the caller
    /// can offer a picker.
    Ambiguous(Vec<T>, Diagnosis),
}

/// Outcome of [`crate::application::resolver::Resolver::resolve`].
pub type ResolutionOutcome = Resolution<Candidate>;

/// Outcome of [`crate::application::resolver::Resolver::resolve_environment_only`].
pub type EnvironmentOutcome = Resolution<EnvironmentRef>;

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(t) => Some(t),
            _ => None,
        }
    }

    /// Survivors still in play: one when resolved, none on no-match.
    pub fn candidates(&self) -> &[T] {
        match self {
            Resolution::Resolved(t) => std::slice::from_ref(t),
            Resolution::NoMatch(_) => &[],
            Resolution::Ambiguous(candidates, _) => candidates,
        }
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::NoMatch(d) | Resolution::Ambiguous(_, d) => Some(d),
        }
    }
}
