use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use deploy_resolver::presentation::cli_summary::{print_candidates, print_resolve_error};
use deploy_resolver::presentation::writers::{render_target, writer_for};
use deploy_resolver::{
    finish, init_tracing, AppConfig, CandidateProvider, ConfigurationError, Constraints,
    GitRemoteSource, JsonFileCandidateProvider, LogLevel, RemoteSource, ResolveError,
    ResolvedTarget,
};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "deploy-resolver",
    version,
    about = "Pick exactly one account / application / environment from partial hints."
)]
struct Cli {
    /// Configuration file (defaults to <config dir>/deploy-resolver/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON file with the visible app environments (overrides candidates.path)
    #[arg(long, global = true)]
    candidates: Option<PathBuf>,

    /// Git remote URI to match applications against; repeatable. Skips git discovery.
    #[arg(long = "remote", global = true)]
    remotes: Vec<String>,

    /// Do not look for git remotes in the current directory
    #[arg(long, global = true)]
    no_git: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log filter and remote-discovery detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single account / app / environment
    Resolve {
        /// Application name or fragment
        #[arg(short, long)]
        app: Option<String>,

        /// Environment name or fragment
        #[arg(short, long)]
        environment: Option<String>,

        /// Account name or fragment
        #[arg(long)]
        account: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve a single account / environment, whatever app it hosts
    Environment {
        /// Environment name or fragment
        #[arg(short, long)]
        environment: Option<String>,

        /// Account name or fragment
        #[arg(long)]
        account: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the visible app environments
    #[command(alias = "ls")]
    List,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(if cli.quiet {
        LogLevel::Error
    } else if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let cfg = AppConfig::load(cli.config.as_deref())?;
    let source = cli
        .candidates
        .clone()
        .or_else(|| cfg.candidates.path.clone())
        .ok_or_else(|| anyhow!("No candidate source: pass --candidates or set candidates.path"))?;
    let provider: Arc<dyn CandidateProvider> = Arc::new(JsonFileCandidateProvider::new(source));

    match cli.command {
        Command::List => {
            let candidates = deploy_resolver::fetch_candidates(provider).await?;
            print_candidates(&candidates);
            Ok(ExitCode::SUCCESS)
        }

        Command::Resolve {
            ref app,
            ref environment,
            ref account,
            ref format,
        } => {
            let constraints = build_constraints(
                &cli,
                app.as_deref(),
                environment.as_deref(),
                account.as_deref(),
            )
            .await?;
            let outcome = deploy_resolver::run(&cfg, provider, constraints).await;
            match settle(outcome, &cfg)? {
                Ok(candidate) => emit(format, ResolvedTarget::AppEnvironment(&candidate)),
                Err(err) => Ok(fail(&err)),
            }
        }

        Command::Environment {
            ref environment,
            ref account,
            ref format,
        } => {
            let constraints =
                build_constraints(&cli, None, environment.as_deref(), account.as_deref())
                    .await?;
            let outcome = deploy_resolver::run_environment(&cfg, provider, constraints).await;
            match settle(outcome, &cfg)? {
                Ok(environment) => emit(format, ResolvedTarget::Environment(&environment)),
                Err(err) => Ok(fail(&err)),
            }
        }
    }
}

/// Assemble constraints from flags plus `--remote` or git discovery.
async fn build_constraints(
    cli: &Cli,
    app: Option<&str>,
    environment: Option<&str>,
    account: Option<&str>,
) -> Result<Constraints> {
    let remotes = if !cli.remotes.is_empty() {
        Some(cli.remotes.clone())
    } else if cli.no_git {
        None
    } else {
        GitRemoteSource::new(std::env::current_dir()?).remotes().await?
    };

    let mut constraints = Constraints::new();
    if let Some(app) = app {
        constraints = constraints.with_app(app);
    }
    if let Some(environment) = environment {
        constraints = constraints.with_environment(environment);
    }
    if let Some(account) = account {
        constraints = constraints.with_account(account);
    }
    if let Some(remotes) = remotes {
        constraints = constraints.with_remotes(remotes);
    }
    Ok(constraints)
}

/// Split resolution failures (printed, exit 1) from other errors (propagated).
fn settle<T: fmt::Debug>(
    outcome: Result<deploy_resolver::Resolution<T>>,
    cfg: &AppConfig,
) -> Result<std::result::Result<T, ResolveError<T>>> {
    match outcome {
        Ok(resolution) => Ok(finish(resolution, &cfg.render_options())),
        Err(err) => match err.downcast::<ConfigurationError>() {
            Ok(config_err) => Ok(Err(ResolveError::Configuration(config_err))),
            Err(err) => Err(err),
        },
    }
}

fn emit(format: &str, target: ResolvedTarget<'_>) -> Result<ExitCode> {
    let writer = writer_for(format).ok_or_else(|| anyhow!("Unknown format: {}", format))?;
    print!("{}", render_target(&*writer, target)?);
    Ok(ExitCode::SUCCESS)
}

fn fail<T: fmt::Debug>(err: &ResolveError<T>) -> ExitCode {
    print_resolve_error(err);
    ExitCode::FAILURE
}
