use reqwest::StatusCode;
use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{client::AocClient, puzzle::Puzzle};

pub const INPUT_FILE: &str = "input.txt";
pub const EXAMPLE_FILE: &str = "example.txt";
const NOT_UNLOCKED_MARKER: &str =
    "Please don't repeatedly request this endpoint before it unlocks!";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("HTTP {status} fetching puzzle input from {url}. The puzzle for this day/year might not be unlocked yet.")]
    NotUnlocked { url: String, status: StatusCode },
    #[error("HTTP {status} fetching puzzle input from {url}. Check if your session cookie is valid or has expired.")]
    InvalidSession { url: String, status: StatusCode },
    #[error("HTTP {status} fetching puzzle input from {url}.")]
    Http {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to fetch puzzle input from {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InputError {
    /// Maps an unsuccessful response to the matching error.
    pub fn from_status(url: &str, status: StatusCode, body: String) -> Self {
        let url = url.to_string();
        match status {
            StatusCode::BAD_REQUEST if body.contains(NOT_UNLOCKED_MARKER) => {
                Self::NotUnlocked { url, status }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::InvalidSession { url, status },
            _ => Self::Http { url, status, body },
        }
    }
}

/// Downloads the puzzle input into `dir` and makes sure an example file sits
/// next to it. A single attempt; every failure is returned to the caller.
pub async fn fetch_input(
    client: &AocClient,
    puzzle: &Puzzle,
    dir: &Path,
) -> Result<PathBuf, InputError> {
    let url = client.input_url(puzzle);
    info!("Fetching puzzle input from: {url}");
    let response = client
        .get(&url)
        .await
        .map_err(|source| InputError::Network {
            url: url.clone(),
            source,
        })?;
    if !response.status.is_success() {
        return Err(InputError::from_status(&url, response.status, response.body));
    }

    write_input(dir, &response.body)
}

/// Writes `input.txt` verbatim and creates an empty `example.txt` unless one
/// already exists.
pub fn write_input(dir: &Path, body: &str) -> Result<PathBuf, InputError> {
    let input = dir.join(INPUT_FILE);
    fs::write(&input, body).map_err(|source| InputError::Write {
        path: input.clone(),
        source,
    })?;
    info!("Input saved to {}", input.display());

    let example = dir.join(EXAMPLE_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&example)
        .map_err(|source| InputError::Write {
            path: example.clone(),
            source,
        })?;
    debug!("Example file present at {}", example.display());
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://adventofcode.com/2023/day/1/input";

    #[test]
    fn locked_puzzle_should_be_detected() {
        let body = format!("{NOT_UNLOCKED_MARKER}\n");
        let err = InputError::from_status(URL, StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, InputError::NotUnlocked { .. }));
        assert!(err.to_string().contains("not be unlocked"));
    }

    #[test]
    fn auth_failure_should_mention_session() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = InputError::from_status(URL, status, String::new());
            assert!(matches!(err, InputError::InvalidSession { .. }));
            assert!(err.to_string().contains("session cookie is valid"));
        }

        let locked = InputError::from_status(
            URL,
            StatusCode::BAD_REQUEST,
            NOT_UNLOCKED_MARKER.to_string(),
        );
        let forbidden = InputError::from_status(URL, StatusCode::FORBIDDEN, String::new());
        assert_ne!(locked.to_string(), forbidden.to_string());
    }

    #[test]
    fn other_statuses_should_keep_body() {
        let err = InputError::from_status(URL, StatusCode::BAD_REQUEST, "nope".into());
        match err {
            InputError::Http { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "nope");
            }
            other => panic!("unexpected {other:?}"),
        }
        let err = InputError::from_status(URL, StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert!(matches!(err, InputError::Http { .. }));
    }

    #[test]
    fn write_input_should_create_both_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EXAMPLE_FILE), "1 2 3\n").unwrap();

        let input = write_input(dir.path(), "42\n17\n").unwrap();
        assert_eq!(fs::read_to_string(input).unwrap(), "42\n17\n");
        assert_eq!(
            fs::read_to_string(dir.path().join(EXAMPLE_FILE)).unwrap(),
            "1 2 3\n"
        );

        let fresh = tempfile::tempdir().unwrap();
        write_input(fresh.path(), "x").unwrap();
        assert_eq!(fs::read(fresh.path().join(EXAMPLE_FILE)).unwrap(), b"");
    }
}
