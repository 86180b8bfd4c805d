use crate::domain::candidate::Candidate;
use crate::domain::error::ResolveError;
use colored::*;
use std::fmt;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct CandidateRow {
    account: String,
    app: String,
    environment: String,
    repository: String,
}

/// Rounded table of the visible app environments, in provider order.
pub fn candidates_table(candidates: &[Candidate]) -> String {
    let rows: Vec<CandidateRow> = candidates
        .iter()
        .map(|c| CandidateRow {
            account: c.account_name.clone(),
            app: c.app_name.bold().to_string(),
            environment: c.environment_name.cyan().to_string(),
            repository: c.repository_uri.dimmed().to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn print_candidates(candidates: &[Candidate]) {
    if candidates.is_empty() {
        println!("{}", "No app environments visible.".italic());
        return;
    }

    println!("{}", candidates_table(candidates));
    println!(
        "{} app environment(s)",
        candidates.len().to_string().bold()
    );
}

// ─── Failure summary ──────────────────────────────────────────────────────────

/// Print a failed resolution to stderr: a coloured headline, then the
/// remediation text.
pub fn print_resolve_error<T: fmt::Debug>(err: &ResolveError<T>) {
    let headline = match err {
        ResolveError::Configuration(_) => "INVALID REQUEST".bold().red(),
        ResolveError::NoMatch { .. } => "NO MATCH".bold().red(),
        ResolveError::Ambiguous { .. } => "AMBIGUOUS".bold().yellow(),
    };

    eprintln!("{headline}");
    eprintln!("{}", err.to_string().trim_end());

    if let ResolveError::Ambiguous { candidates, .. } = err {
        eprintln!();
        eprintln!(
            "{} candidates still match.",
            candidates.len().to_string().bold()
        );
    }
}
