use clap::Parser;
use std::path::PathBuf;

use crate::{
    puzzle::{parse_day, parse_year},
    scaffold::LanguageChoice,
};

/// Advent of Code day bootstrapper. Sets up directories, fetches input and
/// problem statements, and scaffolds language-specific projects.
#[derive(Debug, Parser)]
#[command(name = "aoc-init", version, about)]
pub struct Cli {
    /// Challenge year (e.g. 2023). Must be 2015 or later.
    #[arg(short, long, value_parser = parse_year)]
    pub year: u32,

    /// Day of the challenge (1-25, no zero-padding).
    #[arg(short, long, value_parser = parse_day, value_name = "DAY[1-25]")]
    pub day: u32,

    /// Session cookie value. Overrides AOC_SESSION from the env file.
    #[arg(short, long)]
    pub session: Option<String>,

    /// Languages to scaffold project structures for.
    #[arg(
        short = 'l',
        long = "language",
        value_enum,
        num_args = 1..,
        default_values_t = [LanguageChoice::All],
        conflicts_with = "refresh_instructions"
    )]
    pub languages: Vec<LanguageChoice>,

    /// Also download the problem statement as a text file.
    #[arg(short, long)]
    pub instructions: bool,

    /// Only re-download the problem statement (e.g. once Part Two is out).
    /// Input download and scaffolding are skipped.
    #[arg(long, conflicts_with = "instructions")]
    pub refresh_instructions: bool,

    /// Base directory for challenge folders [default: current directory].
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// File holding AOC_SESSION=<cookie>.
    #[arg(long, value_name = "FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Show requests, command output and other details.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults_should_work() {
        let cli = Cli::try_parse_from(["aoc-init", "-y", "2020", "-d", "3"]).unwrap();
        assert_eq!(cli.year, 2020);
        assert_eq!(cli.day, 3);
        assert_eq!(cli.languages, vec![LanguageChoice::All]);
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert!(cli.session.is_none());
        assert!(!cli.instructions && !cli.refresh_instructions && !cli.verbose);

        let logged = format!("{cli:?}");
        assert!(logged.contains("year: 2020") && logged.contains("languages: [All]"));
    }

    #[test]
    fn languages_should_accept_many() {
        let cli = Cli::try_parse_from([
            "aoc-init", "-y", "2020", "-d", "3", "-s", "abc", "-l", "rust", "go", "-i", "-v",
        ])
        .unwrap();
        assert_eq!(cli.languages, vec![LanguageChoice::Rust, LanguageChoice::Go]);
        assert_eq!(cli.session.as_deref(), Some("abc"));
        assert!(cli.instructions && cli.verbose);
    }

    #[test]
    fn bad_values_should_be_rejected() {
        for args in [
            ["aoc-init", "-y", "2014", "-d", "3"],
            ["aoc-init", "-y", "2020", "-d", "26"],
            ["aoc-init", "-y", "soon", "-d", "3"],
        ] {
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn refresh_should_conflict_with_setup_flags() {
        let err = Cli::try_parse_from([
            "aoc-init", "-y", "2020", "-d", "3", "--refresh-instructions", "-i",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = Cli::try_parse_from([
            "aoc-init", "-y", "2020", "-d", "3", "--refresh-instructions", "-l", "go",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["aoc-init", "-y", "2020", "-d", "3", "--refresh-instructions"])
            .unwrap();
        assert!(cli.refresh_instructions);
    }
}
