//! # deploy-resolver: library usage example
//!
//! Shows three common patterns for consuming deploy-resolver as a library:
//!
//! 1. **From a candidates file**: mirrors the CLI
//! 2. **In-memory candidates**: you already fetched the associations
//! 3. **Inspect the diagnosis**: branch on structured failure data
//!
//! Run with a candidates file:
//!   cargo run --example resolve_as_lib -- app_environments.json blog
//!
//! Run with the built-in candidates:
//!   cargo run --example resolve_as_lib

use std::sync::Arc;

use anyhow::Result;
use deploy_resolver::{
    finish, render, AppConfig, Candidate, Constraints, Diagnosis, JsonFileCandidateProvider,
    RenderOptions, Resolution, Resolver, StaticCandidates,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    match (args.get(1), args.get(2)) {
        (Some(path), Some(app)) => from_candidates_file(path, app).await,
        _ => {
            in_memory().await?;
            inspect_diagnosis()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 1: read candidates from a JSON file (same as the CLI does)
// ─────────────────────────────────────────────────────────────────────────────
async fn from_candidates_file(path: &str, app: &str) -> Result<()> {
    println!("=== Pattern 1: from candidates file ({path}) ===\n");

    let cfg = AppConfig::default();
    let provider = Arc::new(JsonFileCandidateProvider::new(path));
    let outcome = deploy_resolver::run(&cfg, provider, Constraints::new().with_app(app)).await?;

    match finish(outcome, &cfg.render_options()) {
        Ok(target) => println!("Resolved: {target:?}"),
        Err(err) => eprintln!("{err}"),
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 2: candidates already in memory, resolved through the async facade
// ─────────────────────────────────────────────────────────────────────────────
async fn in_memory() -> Result<()> {
    println!("=== Pattern 2: in-memory candidates ===\n");

    let provider = Arc::new(StaticCandidates::new(sample()));
    let constraints = Constraints::new()
        .with_remotes(["https://github.com/acme/blog.git"])
        .with_environment("prod");

    let outcome = deploy_resolver::run(&AppConfig::default(), provider, constraints).await?;
    if let Some(target) = outcome.resolved() {
        println!(
            "{} / {} / {}\n",
            target.account_name, target.app_name, target.environment_name
        );
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern 3: branch on the structured diagnosis instead of parsing text
// ─────────────────────────────────────────────────────────────────────────────
fn inspect_diagnosis() -> Result<()> {
    println!("=== Pattern 3: inspect the diagnosis ===\n");

    let candidates = sample();
    let outcome = Resolver::default().resolve(&candidates, &Constraints::new().with_app("blog"))?;

    match &outcome {
        Resolution::Resolved(c) => println!("Resolved {}", c.environment_name),
        Resolution::NoMatch(diagnosis) => {
            println!("No match, blame: {:?}", diagnosis.dimension());
        }
        Resolution::Ambiguous(candidates, Diagnosis::MultipleAppEnvironments { applications }) => {
            println!("{} candidates left:", candidates.len());
            for app in applications {
                println!(
                    "  {}/{} -> {}",
                    app.account_name,
                    app.app_name,
                    app.environments.join(", ")
                );
            }
        }
        Resolution::Ambiguous(_, other) => println!("Ambiguous: {other:?}"),
    }

    if let Some(diagnosis) = outcome.diagnosis() {
        println!();
        println!("{}", render(diagnosis, &RenderOptions::default()));
    }
    Ok(())
}

fn sample() -> Vec<Candidate> {
    vec![
        Candidate::new("acme", "blog", "production", "git@github.com:acme/blog.git"),
        Candidate::new("acme", "blog", "staging", "git@github.com:acme/blog.git"),
        Candidate::new("acme", "shop", "production", "git@github.com:acme/shop.git"),
    ]
}
