use std::collections::BTreeSet;

use crate::domain::value_objects::Dimension;

/// User-supplied hints for one resolution attempt.
///
/// An absent field leaves its dimension unconstrained. Empty or
/// whitespace-only strings count as absent, and so does an empty remote set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub app_name: Option<String>,
    pub environment_name: Option<String>,
    pub account_name: Option<String>,
    /// Git remotes configured in the working directory.
    pub remote_uris: Option<BTreeSet<String>>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_environment(mut self, environment_name: impl Into<String>) -> Self {
        self.environment_name = Some(environment_name.into());
        self
    }

    pub fn with_account(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    pub fn with_remotes<I, S>(mut self, remotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remote_uris = Some(remotes.into_iter().map(Into::into).collect());
        self
    }

    /// Fill an unconstrained environment with `default`, leaving an explicit
    /// one untouched.
    pub fn or_default_environment(mut self, default: Option<&str>) -> Self {
        if self.target(Dimension::Environment).is_none() {
            if let Some(env) = default.filter(|d| !d.trim().is_empty()) {
                self.environment_name = Some(env.to_string());
            }
        }
        self
    }

    /// The requested fragment for `dimension`, if that dimension is constrained.
    pub fn target(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::Account => self.account_name.as_deref(),
            Dimension::App => self.app_name.as_deref(),
            Dimension::Environment => self.environment_name.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Remote URIs, or `None` when no repository remotes were supplied.
    pub fn remotes(&self) -> Option<&BTreeSet<String>> {
        self.remote_uris.as_ref().filter(|r| !r.is_empty())
    }

    /// At least one dimension is constrained or remotes are present.
    pub fn has_discriminator(&self) -> bool {
        Dimension::ALL.iter().any(|d| self.target(*d).is_some()) || self.remotes().is_some()
    }
}
