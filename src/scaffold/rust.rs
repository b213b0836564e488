use askama::Template;
use std::{fs, path::Path};
use tracing::debug;

use super::{run_tool, write_file, write_template, Language, ScaffoldContext, ScaffoldError, Scaffolder};

#[derive(Template)]
#[template(path = "main.rs.j2", escape = "none")]
struct MainRs {
    year: u32,
    day: String,
}

/// `cargo new`, then give the package a name unique to the day.
#[derive(Debug, Clone)]
pub struct RustScaffolder {
    pub cargo: String,
}

impl Default for RustScaffolder {
    fn default() -> Self {
        Self {
            cargo: "cargo".to_string(),
        }
    }
}

impl Scaffolder for RustScaffolder {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn init(&self, ctx: &ScaffoldContext, project_dir: &Path) -> Result<(), ScaffoldError> {
        let dir_name = Language::Rust.to_string();
        run_tool(&self.cargo, &["new", &dir_name, "--vcs", "none"], &ctx.day_dir)?;

        let manifest = project_dir.join("Cargo.toml");
        if manifest.exists() {
            let content = fs::read_to_string(&manifest).map_err(|source| ScaffoldError::Io {
                path: manifest.clone(),
                source,
            })?;
            let name = ctx.puzzle.project_name(Language::Rust);
            debug!("Renaming package `{dir_name}` to `{name}`");
            write_file(&manifest, rename_package(&content, &dir_name, &name))?;
        }

        let src = project_dir.join("src");
        if src.is_dir() {
            write_template(
                &src.join("main.rs"),
                &MainRs {
                    year: ctx.puzzle.year(),
                    day: ctx.puzzle.padded_day(),
                },
            )?;
        }
        Ok(())
    }
}

fn rename_package(manifest: &str, from: &str, to: &str) -> String {
    manifest.replacen(
        &format!("name = \"{from}\""),
        &format!("name = \"{to}\""),
        1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        puzzle::Puzzle,
        scaffold::{scaffold, ScaffoldOutcome},
    };

    #[test]
    fn rename_package_should_only_touch_package_name() {
        let manifest = "[package]\nname = \"rust\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\n";
        let renamed = rename_package(manifest, "rust", "aoc_2024_day_01_rust");
        assert!(renamed.starts_with("[package]\nname = \"aoc_2024_day_01_rust\"\n"));
        assert!(renamed.ends_with("[dependencies]\n"));
    }

    #[test]
    fn main_rs_should_greet_the_day() {
        let source = MainRs {
            year: 2024,
            day: "01".to_string(),
        }
        .render()
        .unwrap();
        assert!(source.contains("println!(\"Day 01 — Advent of Code 2024\");"));
    }

    #[test]
    fn missing_cargo_should_fail_without_creating_project() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ScaffoldContext::new(dir.path(), Puzzle::new(2024, 1).unwrap());
        let scaffolder = RustScaffolder {
            cargo: "aoc-init-no-such-cargo".to_string(),
        };
        let err = scaffold(&scaffolder, &ctx).unwrap_err();
        assert!(matches!(err, ScaffoldError::ToolNotFound { .. }));
        assert!(!ctx.project_dir(Language::Rust).exists());

        fs::create_dir(ctx.project_dir(Language::Rust)).unwrap();
        assert!(matches!(
            scaffold(&scaffolder, &ctx).unwrap(),
            ScaffoldOutcome::Skipped(_)
        ));
    }
}
