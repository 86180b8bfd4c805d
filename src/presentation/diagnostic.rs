use std::fmt::{self, Write as FmtWrite};

use crate::domain::{
    candidate::EnvironmentRef,
    diagnosis::{AppEnvironments, AppLookup, Diagnosis},
    error::ResolveError,
    resolution::Resolution,
    value_objects::Dimension,
};

/// Width of the name column in remediation listings.
const NAME_WIDTH: usize = 25;

/// Settings that only affect how a [`Diagnosis`] reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Command prefix of every hint, e.g. `deploy <command>`.
    pub command_hint: String,
    /// Where applications can be registered.
    pub endpoint: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            command_hint: "deploy <command>".to_string(),
            endpoint: "https://cloud.example.com".to_string(),
        }
    }
}

/// Turn a non-resolved outcome into a [`ResolveError`] carrying the rendered
/// message; pass a resolved one through.
pub fn finish<T: fmt::Debug>(
    resolution: Resolution<T>,
    opts: &RenderOptions,
) -> Result<T, ResolveError<T>> {
    match resolution {
        Resolution::Resolved(target) => Ok(target),
        Resolution::NoMatch(diagnosis) => {
            let message = render(&diagnosis, opts);
            Err(ResolveError::NoMatch { diagnosis, message })
        }
        Resolution::Ambiguous(candidates, diagnosis) => {
            let message = render(&diagnosis, opts);
            Err(ResolveError::Ambiguous {
                candidates,
                diagnosis,
                message,
            })
        }
    }
}

/// Render remediation text. Every listed option comes with the literal
/// command that selects it.
pub fn render(diagnosis: &Diagnosis, opts: &RenderOptions) -> String {
    let mut s = String::new();

    match diagnosis {
        Diagnosis::NoAccount {
            account_name,
            available,
        } => {
            let _ = writeln!(s, "No account found matching {account_name:?}.");
            choices(&mut s, opts, "Accounts you can use:", Dimension::Account, available);
        }

        Diagnosis::NoApplication { lookup, available } => {
            match lookup {
                AppLookup::Named(app_name) => {
                    let _ = writeln!(s, "No application found matching {app_name:?}.");
                    if available.is_empty() {
                        let _ = writeln!(
                            s,
                            "You can add this application at {}, then retry with:",
                            opts.endpoint
                        );
                        let _ = writeln!(
                            s,
                            "\t{app_name:<width$} # {}",
                            hint(opts, &[(Dimension::App, app_name.as_str())]),
                            width = NAME_WIDTH
                        );
                    }
                }
                AppLookup::Remotes(remotes) => {
                    let _ = writeln!(
                        s,
                        "No application configured for any of the following remotes:"
                    );
                    for remote in remotes {
                        let _ = writeln!(s, "\t{remote}");
                    }
                    let _ = writeln!(s, "You can add this application at {}.", opts.endpoint);
                }
                AppLookup::Unconstrained if available.is_empty() => {
                    let _ = writeln!(
                        s,
                        "No application found. You can add an application at {}, then select it with:",
                        opts.endpoint
                    );
                    let _ = writeln!(s, "\t{}", hint(opts, &[(Dimension::App, "<app name>")]));
                }
                AppLookup::Unconstrained => {
                    let _ = writeln!(
                        s,
                        "No application found. You can add an application at {}.",
                        opts.endpoint
                    );
                }
            }
            choices(&mut s, opts, "Applications you can use:", Dimension::App, available);
        }

        Diagnosis::NoEnvironment {
            environment_name,
            available,
        } => {
            let _ = writeln!(s, "No environment found matching {environment_name:?}.");
            choices(
                &mut s,
                opts,
                "Environments you can use:",
                Dimension::Environment,
                available,
            );
        }

        Diagnosis::EnvironmentOnOtherAccount {
            environment_name,
            account_name,
            found,
        } => {
            let _ = writeln!(
                s,
                "Environment matching {environment_name:?} exists on a different account than {account_name:?}:\n"
            );
            environment_lines(&mut s, opts, found);
        }

        Diagnosis::Mismatch { applications } => {
            let _ = writeln!(
                s,
                "The matched apps & environments do not correspond with each other."
            );
            let _ = writeln!(s, "Applications:");
            for app in applications {
                let _ = writeln!(s, "\t{}/{}", app.account_name, app.app_name);
                for env in &app.environments {
                    let _ = writeln!(
                        s,
                        "\t\t{env:<width$} # {}",
                        app_environment_hint(opts, app, env),
                        width = NAME_WIDTH
                    );
                }
                shared_repositories(&mut s, "\t\t", app);
            }
        }

        Diagnosis::MultipleAppEnvironments { applications } => {
            let _ = writeln!(
                s,
                "Multiple application environments possible, please be more specific:\n"
            );
            for app in applications {
                let _ = writeln!(s, "{}/{}", app.account_name, app.app_name);
                for env in &app.environments {
                    let _ = writeln!(
                        s,
                        "\t{env:<width$} # {}",
                        app_environment_hint(opts, app, env),
                        width = NAME_WIDTH
                    );
                }
                shared_repositories(&mut s, "\t", app);
            }
        }

        Diagnosis::MultipleEnvironments {
            environment_name,
            environments,
        } => {
            match environment_name {
                Some(_) => {
                    let _ = writeln!(
                        s,
                        "Multiple environments possible, please be more specific:\n"
                    );
                }
                None => {
                    let _ = writeln!(
                        s,
                        "The git remotes in this directory match more than one environment."
                    );
                    let _ = writeln!(
                        s,
                        "Please use --environment to pick one of the following:\n"
                    );
                }
            }
            environment_lines(&mut s, opts, environments);
        }
    }

    s
}

// ─── Hint helpers ─────────────────────────────────────────────────────────────

fn choices(s: &mut String, opts: &RenderOptions, title: &str, dimension: Dimension, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let _ = writeln!(s, "{title}");
    for value in values {
        let _ = writeln!(
            s,
            "\t{value:<width$} # {}",
            hint(opts, &[(dimension, value.as_str())]),
            width = NAME_WIDTH
        );
    }
}

fn shared_repositories(s: &mut String, indent: &str, app: &AppEnvironments) {
    if app.shared_repositories.is_empty() {
        return;
    }
    let _ = writeln!(
        s,
        "{indent}(the same names are linked to several repositories: {})",
        app.shared_repositories.join(", ")
    );
}

fn environment_lines(s: &mut String, opts: &RenderOptions, environments: &[EnvironmentRef]) {
    for env in environments {
        let _ = writeln!(
            s,
            "\t{:<width$} # {}",
            env.environment_name,
            hint(
                opts,
                &[
                    (Dimension::Environment, env.environment_name.as_str()),
                    (Dimension::Account, env.account_name.as_str()),
                ]
            ),
            width = NAME_WIDTH
        );
    }
}

fn app_environment_hint(opts: &RenderOptions, app: &AppEnvironments, environment: &str) -> String {
    hint(
        opts,
        &[
            (Dimension::Account, app.account_name.as_str()),
            (Dimension::App, app.app_name.as_str()),
            (Dimension::Environment, environment),
        ],
    )
}

/// `deploy <command> --account='acme' --app='blog'`
fn hint(opts: &RenderOptions, flags: &[(Dimension, &str)]) -> String {
    let mut s = opts.command_hint.clone();
    for (dimension, value) in flags {
        let _ = write!(s, " --{}={}", dimension.flag(), shell_quote(value));
    }
    s
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::resolver::Resolver;
    use crate::domain::candidate::Candidate;
    use crate::domain::constraints::Constraints;

    fn opts() -> RenderOptions {
        RenderOptions {
            command_hint: "ey <command>".into(),
            endpoint: "https://deploy.acme.test".into(),
        }
    }

    fn render_failure(all: &[Candidate], constraints: Constraints) -> String {
        let outcome = Resolver::default().resolve(all, &constraints).unwrap();
        let diagnosis = outcome.diagnosis().expect("resolution should fail");
        render(diagnosis, &opts())
    }

    #[test]
    fn ambiguous_accounts_get_account_flags() {
        let all = vec![
            Candidate::new("acme", "blog", "production", ""),
            Candidate::new("other", "blog", "production", ""),
        ];
        let outcome = Resolver::default()
            .resolve(
                &all,
                &Constraints::new().with_app("blog").with_environment("production"),
            )
            .unwrap();

        let err = finish(outcome, &opts()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Multiple application environments possible"));
        assert!(message.contains("--account='acme'"));
        assert!(message.contains("--account='other'"));
        assert!(matches!(err, ResolveError::Ambiguous { ref candidates, .. } if candidates.len() == 2));
    }

    #[test]
    fn ambiguity_lines_are_reproducible_commands() {
        let diagnosis = Diagnosis::MultipleAppEnvironments {
            applications: vec![AppEnvironments {
                account_name: "acme".into(),
                app_name: "blog".into(),
                environments: vec!["production".into(), "staging".into()],
                shared_repositories: vec![],
            }],
        };
        let expected = "Multiple application environments possible, please be more specific:\n\
                        \n\
                        acme/blog\n\
                        \tproduction                # ey <command> --account='acme' --app='blog' --environment='production'\n\
                        \tstaging                   # ey <command> --account='acme' --app='blog' --environment='staging'\n";
        assert_eq!(render(&diagnosis, &opts()), expected);
    }

    #[test]
    fn missing_account_lists_known_accounts() {
        let diagnosis = Diagnosis::NoAccount {
            account_name: "nope".into(),
            available: vec!["acme".into()],
        };
        let message = render(&diagnosis, &opts());
        assert!(message.starts_with("No account found matching \"nope\"."));
        assert!(message.contains("# ey <command> --account='acme'"));
    }

    #[test]
    fn unlinked_remotes_point_at_the_endpoint() {
        let diagnosis = Diagnosis::NoApplication {
            lookup: AppLookup::Remotes(vec!["git@h:acme/blog.git".into()]),
            available: vec!["shop".into()],
        };
        let message = render(&diagnosis, &opts());
        assert!(message.contains("\tgit@h:acme/blog.git\n"));
        assert!(message.contains("You can add this application at https://deploy.acme.test."));
        assert!(message.contains("--app='shop'"));
    }

    #[test]
    fn remote_driven_environment_ambiguity_asks_for_environment() {
        let diagnosis = Diagnosis::MultipleEnvironments {
            environment_name: None,
            environments: vec![EnvironmentRef {
                account_name: "acme".into(),
                environment_name: "staging".into(),
            }],
        };
        let message = render(&diagnosis, &opts());
        assert!(message.contains("Please use --environment"));
        assert!(message.contains("--environment='staging' --account='acme'"));
    }

    #[test]
    fn quotes_inside_names_are_escaped() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn resolved_outcome_passes_through() {
        let candidate = Candidate::new("acme", "blog", "production", "");
        let target = finish(Resolution::Resolved(candidate.clone()), &opts()).unwrap();
        assert_eq!(target, candidate);
    }

    #[test]
    fn mismatch_lists_valid_combinations_per_app() {
        let all = vec![
            Candidate::new("acme", "blog", "staging", ""),
            Candidate::new("acme", "blog", "production", ""),
            Candidate::new("acme", "shop", "qa", ""),
        ];
        let message = render_failure(&all, Constraints::new().with_app("blog").with_environment("qa"));
        let expected = "The matched apps & environments do not correspond with each other.\n\
                        Applications:\n\
                        \tacme/blog\n\
                        \t\tproduction                # ey <command> --account='acme' --app='blog' --environment='production'\n\
                        \t\tstaging                   # ey <command> --account='acme' --app='blog' --environment='staging'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn environment_on_another_account_points_at_its_owner() {
        let all = vec![
            Candidate::new("acme", "blog", "staging", ""),
            Candidate::new("other", "shop", "live", ""),
        ];
        let message =
            render_failure(&all, Constraints::new().with_account("acme").with_environment("live"));
        let expected = "Environment matching \"live\" exists on a different account than \"acme\":\n\
                        \n\
                        \tlive                      # ey <command> --environment='live' --account='other'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn missing_environment_lists_known_environments() {
        let all = vec![
            Candidate::new("acme", "blog", "production", ""),
            Candidate::new("acme", "blog", "staging", ""),
        ];
        let message = render_failure(&all, Constraints::new().with_app("blog").with_environment("qa"));
        let expected = "No environment found matching \"qa\".\n\
                        Environments you can use:\n\
                        \tproduction                # ey <command> --environment='production'\n\
                        \tstaging                   # ey <command> --environment='staging'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn missing_named_app_lists_known_apps() {
        let all = vec![
            Candidate::new("acme", "shop", "production", ""),
            Candidate::new("acme", "blog", "production", ""),
        ];
        let message = render_failure(&all, Constraints::new().with_app("wiki"));
        let expected = "No application found matching \"wiki\".\n\
                        Applications you can use:\n\
                        \tblog                      # ey <command> --app='blog'\n\
                        \tshop                      # ey <command> --app='shop'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn named_app_with_nothing_visible_still_gets_a_command() {
        let message = render_failure(&[], Constraints::new().with_app("blog"));
        let expected = "No application found matching \"blog\".\n\
                        You can add this application at https://deploy.acme.test, then retry with:\n\
                        \tblog                      # ey <command> --app='blog'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn nothing_visible_without_app_name_suggests_app_flag() {
        let message = render_failure(&[], Constraints::new().with_account("acme"));
        let expected = "No application found. You can add an application at https://deploy.acme.test, then select it with:\n\
                        \tey <command> --app='<app name>'\n";
        assert_eq!(message, expected);
    }

    #[test]
    fn records_differing_only_by_repository_name_them() {
        let all = vec![
            Candidate::new("acme", "blog", "production", "git@h:acme/blog-a.git"),
            Candidate::new("acme", "blog", "production", "git@h:acme/blog-b.git"),
        ];
        let message = render_failure(
            &all,
            Constraints::new()
                .with_account("acme")
                .with_app("blog")
                .with_environment("production"),
        );
        let expected = "Multiple application environments possible, please be more specific:\n\
                        \n\
                        acme/blog\n\
                        \tproduction                # ey <command> --account='acme' --app='blog' --environment='production'\n\
                        \t(the same names are linked to several repositories: git@h:acme/blog-a.git, git@h:acme/blog-b.git)\n";
        assert_eq!(message, expected);
    }
}
