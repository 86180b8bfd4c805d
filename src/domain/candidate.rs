use serde::{Deserialize, Serialize};

/// One (account, application, environment) association visible to the caller.
///
/// Field names on the wire follow the remote API (`account`, `app`,
/// `environment`); the long `*_name` spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "account", alias = "account_name")]
    pub account_name: String,
    #[serde(rename = "app", alias = "app_name")]
    pub app_name: String,
    #[serde(rename = "environment", alias = "environment_name")]
    pub environment_name: String,
    /// Source-control URI the application is linked to. May be empty.
    #[serde(default)]
    pub repository_uri: String,
}

impl Candidate {
    pub fn new(
        account_name: impl Into<String>,
        app_name: impl Into<String>,
        environment_name: impl Into<String>,
        repository_uri: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            app_name: app_name.into(),
            environment_name: environment_name.into(),
            repository_uri: repository_uri.into(),
        }
    }

    /// Account, app and environment names are all non-empty.
    pub fn is_complete(&self) -> bool {
        !self.account_name.is_empty()
            && !self.app_name.is_empty()
            && !self.environment_name.is_empty()
    }

    pub fn environment_ref(&self) -> EnvironmentRef {
        EnvironmentRef {
            account_name: self.account_name.clone(),
            environment_name: self.environment_name.clone(),
        }
    }
}

/// An environment identified by its owning account, without the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentRef {
    #[serde(rename = "account")]
    pub account_name: String,
    #[serde(rename = "environment")]
    pub environment_name: String,
}

/// What a successful resolution hands to output writers.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum ResolvedTarget<'a> {
    AppEnvironment(&'a Candidate),
    Environment(&'a EnvironmentRef),
}
