use std::fmt;

use thiserror::Error;

use crate::domain::diagnosis::Diagnosis;

/// The caller broke a precondition of the resolver. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "Unable to find an application without a git remote URI, app name, environment name \
         or account name. Please specify at least one of --app, --environment or --account."
    )]
    NoDiscriminators,

    #[error("An app name cannot constrain an environment-only resolution.")]
    AppNameNotAllowed,
}

/// A resolution that did not end on exactly one target.
///
/// `message` is the rendered remediation text meant for the CLI error stream.
#[derive(Debug, Error)]
pub enum ResolveError<T: fmt::Debug> {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{message}")]
    NoMatch { diagnosis: Diagnosis, message: String },

    #[error("{message}")]
    Ambiguous {
        candidates: Vec<T>,
        diagnosis: Diagnosis,
        message: String,
    },
}

impl<T: fmt::Debug> ResolveError<T> {
    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            ResolveError::Configuration(_) => None,
            ResolveError::NoMatch { diagnosis, .. } | ResolveError::Ambiguous { diagnosis, .. } => {
                Some(diagnosis)
            }
        }
    }
}
