use askama::Template;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{create_dir, run_tool, write_template, Language, ScaffoldContext, ScaffoldError, Scaffolder};

#[derive(Template)]
#[template(path = "main.py.j2", escape = "none")]
struct MainPy {
    project: String,
}

/// A virtual environment plus a `main.py`. Prefers `uv`; falls back to the
/// interpreter's own `venv` module.
#[derive(Debug, Clone)]
pub struct PythonScaffolder {
    pub uv: String,
    pub python: String,
}

impl Default for PythonScaffolder {
    fn default() -> Self {
        Self {
            uv: "uv".to_string(),
            python: "python3".to_string(),
        }
    }
}

impl PythonScaffolder {
    /// Returns whether a virtual environment was created. Failure here is
    /// only worth a warning: `main.py` is written either way.
    fn create_venv(&self, project_dir: &Path) -> bool {
        match run_tool(&self.uv, &["venv"], project_dir) {
            Ok(_) => {
                info!("Python venv created with `{}`.", self.uv);
                return true;
            }
            Err(ScaffoldError::ToolNotFound { .. }) => {
                debug!("`{}` not found, trying the standard venv module.", self.uv);
            }
            Err(err) => {
                warn!("{err} Falling back to the standard venv module.");
                log_tool_output(&err);
            }
        }

        match run_tool(&self.python, &["-m", "venv", ".venv"], project_dir) {
            Ok(_) => {
                info!("Python venv created with `{} -m venv`.", self.python);
                true
            }
            Err(err) => {
                warn!("Python venv creation failed. {err}");
                log_tool_output(&err);
                false
            }
        }
    }
}

impl Scaffolder for PythonScaffolder {
    fn language(&self) -> Language {
        Language::Python
    }

    fn init(&self, ctx: &ScaffoldContext, project_dir: &Path) -> Result<(), ScaffoldError> {
        create_dir(project_dir)?;
        if !self.create_venv(project_dir) {
            warn!("Failed to create Python virtual environment.");
        }
        write_template(
            &project_dir.join("main.py"),
            &MainPy {
                project: ctx.puzzle.project_name(Language::Python),
            },
        )
    }
}

fn log_tool_output(err: &ScaffoldError) {
    if let ScaffoldError::ToolFailed { stdout, stderr, .. } = err {
        if !stdout.trim().is_empty() {
            debug!("stdout:\n{stdout}");
        }
        if !stderr.trim().is_empty() {
            debug!("stderr:\n{stderr}");
        }
    }
}
