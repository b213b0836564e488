//! Starter projects for the languages a day can be solved in.
//!
//! Each language is a [`Scaffolder`]: it owns the toolchain command that
//! initialises a project and the files written afterwards. [`scaffold`] is the
//! shared driver; it never touches a project directory that already exists.

mod go;
mod python;
mod rust;

pub use go::GoScaffolder;
pub use python::PythonScaffolder;
pub use rust::RustScaffolder;

use askama::Template;
use clap::ValueEnum;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Output},
};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;
use tracing::{debug, info};

use crate::puzzle::Puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Rust,
    Go,
    Python,
}

/// A `--language` value: one language or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageChoice {
    All,
    Rust,
    Go,
    Python,
}

/// Expands the choices into languages in a fixed order, without duplicates.
pub fn select_languages(choices: &[LanguageChoice]) -> Vec<Language> {
    Language::iter()
        .filter(|lang| {
            choices.iter().any(|choice| match choice {
                LanguageChoice::All => true,
                LanguageChoice::Rust => *lang == Language::Rust,
                LanguageChoice::Go => *lang == Language::Go,
                LanguageChoice::Python => *lang == Language::Python,
            })
        })
        .collect()
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("`{tool}` command not found. Is it installed and in your PATH?")]
    ToolNotFound { tool: String },
    #[error("`{command}` exited with {status}.")]
    ToolFailed {
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    #[error("Could not run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not render starter file: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    Created(PathBuf),
    Skipped(PathBuf),
}

/// Everything a scaffolder needs to know about the day.
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub day_dir: PathBuf,
    pub puzzle: Puzzle,
}

impl ScaffoldContext {
    pub fn new(day_dir: impl Into<PathBuf>, puzzle: Puzzle) -> Self {
        Self {
            day_dir: day_dir.into(),
            puzzle,
        }
    }

    pub fn project_dir(&self, language: Language) -> PathBuf {
        self.day_dir.join(language.to_string())
    }
}

pub trait Scaffolder: Send {
    fn language(&self) -> Language;

    /// Creates the project at `project_dir`, which does not exist yet.
    fn init(&self, ctx: &ScaffoldContext, project_dir: &Path) -> Result<(), ScaffoldError>;
}

pub fn scaffolder_for(language: Language) -> Box<dyn Scaffolder> {
    match language {
        Language::Rust => Box::<RustScaffolder>::default(),
        Language::Go => Box::<GoScaffolder>::default(),
        Language::Python => Box::<PythonScaffolder>::default(),
    }
}

/// Runs `scaffolder` unless its project directory is already there.
pub fn scaffold(
    scaffolder: &dyn Scaffolder,
    ctx: &ScaffoldContext,
) -> Result<ScaffoldOutcome, ScaffoldError> {
    let language = scaffolder.language();
    let project_dir = ctx.project_dir(language);
    if project_dir.exists() {
        info!(
            "{language} project already exists at {}, skipping.",
            project_dir.display()
        );
        return Ok(ScaffoldOutcome::Skipped(project_dir));
    }

    info!("Scaffolding {language} project in {}...", project_dir.display());
    scaffolder.init(ctx, &project_dir)?;
    info!("{language} project scaffolded.");
    Ok(ScaffoldOutcome::Created(project_dir))
}

/// Runs `program` in `cwd` and waits for it, capturing its output.
pub(crate) fn run_tool(program: &str, args: &[&str], cwd: &Path) -> Result<Output, ScaffoldError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running: {command} in {}", cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ScaffoldError::ToolNotFound {
                tool: program.to_string(),
            },
            _ => ScaffoldError::Spawn {
                command: command.clone(),
                source,
            },
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !stdout.trim().is_empty() {
        debug!("{program} stdout:\n{stdout}");
    }
    if !output.status.success() {
        return Err(ScaffoldError::ToolFailed {
            command,
            status: output.status,
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Renders `template` into `path`, ending the file with a newline.
pub(crate) fn write_template(path: &Path, template: &impl Template) -> Result<(), ScaffoldError> {
    let mut source = template.render()?;
    if !source.ends_with('\n') {
        source.push('\n');
    }
    debug!("Writing {}", path.display());
    write_file(path, source)
}

pub(crate) fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), ScaffoldError> {
    fs::write(path, content).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir(path).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}
