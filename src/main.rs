use anyhow::{Context, Result};
use aoc_init::{
    cli::Cli,
    client::AocClient,
    config::{self, SettingsBuilder},
    input::{self, InputError},
    interrupt::{until_interrupted, RunOutcome},
    puzzle::Puzzle,
    scaffold::{self, Language, ScaffoldContext, ScaffoldError},
    statement, workspace,
};
use clap::Parser;
use std::{env, process::ExitCode};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match until_interrupted(run(cli), tokio::signal::ctrl_c()).await {
        RunOutcome::Finished(Ok(())) => ExitCode::SUCCESS,
        RunOutcome::Finished(Err(err)) => {
            error!("{err:#}");
            debug!("{err:?}");
            ExitCode::FAILURE
        }
        RunOutcome::Interrupted => {
            eprintln!("\nOperation cancelled by user.");
            std::process::exit(130);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info,aoc_init=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    debug!("Verbose mode enabled.");
    debug!("Parsed arguments: {cli:?}");

    let session = config::load_session(cli.session.as_deref(), &cli.env_file)?;
    let settings = SettingsBuilder::default().session(session).build()?;
    let client = AocClient::new(&settings).context("Could not build the HTTP client")?;

    let puzzle = Puzzle::new(cli.year, cli.day)?;
    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => env::current_dir().context("Could not determine the current directory")?,
    };
    debug!(
        "Year: {}, Day: {} (unpadded: {})",
        puzzle.year(),
        puzzle.padded_day(),
        puzzle.day()
    );
    debug!("Base directory for project: {}", base_dir.display());
    let day_dir = workspace::prepare_day_dir(&base_dir, &puzzle)?;

    if cli.refresh_instructions {
        info!("Attempting to refresh instructions only...");
        let status = statement::refresh_statement(&client, &puzzle, &day_dir).await;
        info!("Instructions refresh operation finished: {status}");
        return Ok(());
    }

    if let Err(err) = input::fetch_input(&client, &puzzle, &day_dir).await {
        if let InputError::Http { body, .. } = &err {
            debug!("Response content:\n{body}");
        }
        return Err(err.into());
    }

    if cli.instructions {
        let status = statement::refresh_statement(&client, &puzzle, &day_dir).await;
        info!("Problem statement: {status}");
    }

    let languages = scaffold::select_languages(&cli.languages);
    if !languages.is_empty() {
        let names = languages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        info!("Scaffolding for languages: {names}");
        let ctx = ScaffoldContext::new(&day_dir, puzzle);
        for language in languages {
            scaffold_language(language, ctx.clone()).await;
        }
    }

    info!("Setup complete.");
    Ok(())
}

/// Failures are reported and swallowed so the other languages still run.
async fn scaffold_language(language: Language, ctx: ScaffoldContext) {
    info!("--- {language} ---");
    let result = tokio::task::spawn_blocking(move || {
        scaffold::scaffold(scaffold::scaffolder_for(language).as_ref(), &ctx)
    })
    .await;

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(err)) => {
            error!("{language} scaffolding failed. {err}");
            if let ScaffoldError::ToolFailed { stdout, stderr, .. } = &err {
                if !stderr.trim().is_empty() {
                    error!("stderr: {}", stderr.trim());
                }
                if !stdout.trim().is_empty() {
                    debug!("stdout:\n{stdout}");
                }
            }
        }
        Err(err) => error!("{language} scaffolding aborted: {err}"),
    }
}
