use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::puzzle::Puzzle;

#[derive(Debug, Error)]
#[error("Could not create directory {path}: {source}")]
pub struct WorkspaceError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Where the files for `puzzle` live under `base`.
///
/// When `base` already sits inside a directory named after the year, the year
/// level is not repeated.
pub fn day_dir(base: &Path, puzzle: &Puzzle) -> PathBuf {
    let year = puzzle.year().to_string();
    let inside_year = base
        .components()
        .any(|c| c.as_os_str() == year.as_str());
    if inside_year {
        base.join(puzzle.padded_day())
    } else {
        base.join(year).join(puzzle.padded_day())
    }
}

/// Creates the day directory if needed and returns it.
pub fn prepare_day_dir(base: &Path, puzzle: &Puzzle) -> Result<PathBuf, WorkspaceError> {
    let dir = day_dir(base, puzzle);
    fs::create_dir_all(&dir).map_err(|source| WorkspaceError {
        path: dir.clone(),
        source,
    })?;
    debug!("Ensured directory exists: {}", dir.display());
    info!("Using directory: {}", dir.display());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_day_dir_should_be_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let puzzle = Puzzle::new(2022, 3).unwrap();

        let first = prepare_day_dir(base.path(), &puzzle).unwrap();
        let second = prepare_day_dir(base.path(), &puzzle).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, base.path().join("2022").join("03"));
        assert!(first.is_dir());
    }

    #[test]
    fn year_segment_should_not_repeat() {
        let base = Path::new("/home/elf/aoc/2022");
        let puzzle = Puzzle::new(2022, 11).unwrap();
        assert_eq!(day_dir(base, &puzzle), Path::new("/home/elf/aoc/2022/11"));

        let elsewhere = Path::new("/home/elf/aoc/2022-notes");
        assert_eq!(
            day_dir(elsewhere, &puzzle),
            Path::new("/home/elf/aoc/2022-notes/2022/11")
        );
    }

    #[test]
    fn unwritable_base_should_fail() {
        let base = tempfile::tempdir().unwrap();
        let blocker = base.path().join("file");
        fs::write(&blocker, "").unwrap();
        let puzzle = Puzzle::new(2022, 1).unwrap();
        assert!(prepare_day_dir(&blocker, &puzzle).is_err());
    }
}
