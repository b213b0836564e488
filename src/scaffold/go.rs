use askama::Template;
use std::path::Path;

use super::{create_dir, run_tool, write_template, Language, ScaffoldContext, ScaffoldError, Scaffolder};

#[derive(Template)]
#[template(path = "main.go.j2", escape = "none")]
struct MainGo {
    year: u32,
    day: String,
}

/// `go mod init` plus a `main.go`.
#[derive(Debug, Clone)]
pub struct GoScaffolder {
    pub go: String,
}

impl Default for GoScaffolder {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
        }
    }
}

impl Scaffolder for GoScaffolder {
    fn language(&self) -> Language {
        Language::Go
    }

    fn init(&self, ctx: &ScaffoldContext, project_dir: &Path) -> Result<(), ScaffoldError> {
        create_dir(project_dir)?;
        let module = ctx.puzzle.project_name(Language::Go);
        run_tool(&self.go, &["mod", "init", &module], project_dir)?;
        write_template(
            &project_dir.join("main.go"),
            &MainGo {
                year: ctx.puzzle.year(),
                day: ctx.puzzle.padded_day(),
            },
        )
    }
}
