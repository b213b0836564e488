use anyhow::Result;
use askama::Template;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::{fs, io, path::Path};
use strum::Display;
use tracing::{debug, error, info, warn, Level};

use crate::{client::AocClient, puzzle::Puzzle};

pub const STATEMENT_FILE: &str = "problem_statement.txt";

static ARTICLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.day-desc").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// What happened to `problem_statement.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementStatus {
    Created,
    Updated,
    Unchanged,
    NotFound,
    FailedFetch,
    FailedWrite,
}

#[derive(Debug)]
pub struct StatementPart {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Template)]
#[template(path = "problem_statement.txt.j2", escape = "none")]
struct StatementTemplate<'a> {
    year: u32,
    day: u32,
    source_url: &'a str,
    input_url: &'a str,
    parts: Vec<StatementPart>,
}

/// Fetches the puzzle page and refreshes the saved statement. Never fails:
/// every problem is logged and folded into the returned status.
pub async fn refresh_statement(client: &AocClient, puzzle: &Puzzle, dir: &Path) -> StatementStatus {
    let page_url = client.page_url(puzzle);
    info!("Fetching problem statement from: {page_url}");
    let response = match client.get(&page_url).await {
        Ok(response) => response,
        Err(err) => {
            error!("Failed to fetch problem statement. {err}");
            return StatementStatus::FailedFetch;
        }
    };
    if !response.status.is_success() {
        error!(
            "HTTP {} fetching problem statement from {page_url}.",
            response.status
        );
        debug!("Response content:\n{}", response.body);
        return StatementStatus::FailedFetch;
    }

    let parts = extract_parts(&response.body);
    if parts.is_empty() {
        warn!(
            "Could not find problem description articles (<article class=\"day-desc\">) on {page_url}. \
             The page structure might have changed, or the problem is not yet available."
        );
        if tracing::enabled!(Level::DEBUG) {
            save_raw_page(puzzle, dir, &response.body);
        }
        return StatementStatus::NotFound;
    }

    let text = match render_statement(puzzle, &page_url, &client.input_url(puzzle), parts) {
        Ok(text) => text,
        Err(err) => {
            error!("Could not render problem statement. {err:#}");
            return StatementStatus::FailedWrite;
        }
    };
    save_statement(&dir.join(STATEMENT_FILE), &text)
}

/// Visible text of every `article.day-desc` on the page, in page order.
pub fn extract_parts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document.select(&ARTICLE_SELECTOR).map(article_text).collect()
}

fn article_text(article: ElementRef) -> String {
    let joined = article
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_LINES.replace_all(&joined, "\n\n").trim().to_string()
}

pub fn part_title(index: usize) -> String {
    match index {
        0 => "--- Part One ---".to_string(),
        1 => "--- Part Two ---".to_string(),
        n => format!("--- Part {} ---", n + 1),
    }
}

/// Builds the text saved to disk: a header naming the sources, then one
/// titled block per article.
pub fn render_statement(
    puzzle: &Puzzle,
    source_url: &str,
    input_url: &str,
    parts: Vec<String>,
) -> Result<String> {
    let template = StatementTemplate {
        year: puzzle.year(),
        day: puzzle.day(),
        source_url,
        input_url,
        parts: parts
            .into_iter()
            .enumerate()
            .map(|(i, body)| StatementPart {
                title: part_title(i),
                body,
            })
            .collect(),
    };
    Ok(template.render()?.trim().to_string())
}

/// Writes `text` to `path` and reports how it compares to what was there.
pub fn save_statement(path: &Path, text: &str) -> StatementStatus {
    let previous = match fs::read_to_string(path) {
        Ok(previous) => Some(previous),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(
                "Could not read existing statement at {} for comparison. {err}",
                path.display()
            );
            None
        }
    };

    if let Err(err) = fs::write(path, text) {
        error!(
            "Could not write problem statement file to {}. {err}",
            path.display()
        );
        return StatementStatus::FailedWrite;
    }

    match previous {
        None => {
            info!("Problem statement newly saved to {}", path.display());
            StatementStatus::Created
        }
        Some(previous) if previous == text => {
            info!("Problem statement at {} is already up-to-date.", path.display());
            StatementStatus::Unchanged
        }
        Some(_) => {
            info!("Problem statement updated at {}.", path.display());
            StatementStatus::Updated
        }
    }
}

fn save_raw_page(puzzle: &Puzzle, dir: &Path, html: &str) {
    let path = dir.join(format!(
        "problem_page_raw_{}_{}.html",
        puzzle.year(),
        puzzle.day()
    ));
    match fs::write(&path, html) {
        Ok(()) => debug!("Raw HTML saved to {} for inspection.", path.display()),
        Err(err) => warn!("Could not save raw HTML to {}. {err}", path.display()),
    }
}
