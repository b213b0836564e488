use chrono::Datelike;
use thiserror::Error;

use crate::scaffold::Language;

/// The first year the event ran.
pub const FIRST_YEAR: u32 = 2015;
pub const LAST_DAY: u32 = 25;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("Invalid year format: '{0}'. Must be an integer.")]
    YearFormat(String),
    #[error("Year must be {min} or later. You provided: {0}", min = FIRST_YEAR)]
    YearTooEarly(u32),
    #[error("Year {year} is too far in the future (current: {current}).")]
    YearTooLate { year: u32, current: u32 },
    #[error("Invalid day format: '{0}'. Must be an integer.")]
    DayFormat(String),
    #[error("Day must be between 1 and {max}. You provided: {0}", max = LAST_DAY)]
    DayOutOfRange(u32),
}

/// One day of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle {
    year: u32,
    day: u32,
}

impl Puzzle {
    pub fn new(year: u32, day: u32) -> Result<Self, PuzzleError> {
        validate_year(year, current_year())?;
        if !(1..=LAST_DAY).contains(&day) {
            return Err(PuzzleError::DayOutOfRange(day));
        }
        Ok(Self { year, day })
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Day number as used in directory names, e.g. `07`.
    pub fn padded_day(&self) -> String {
        format!("{:02}", self.day)
    }

    pub fn page_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/day/{}",
            base_url.trim_end_matches('/'),
            self.year,
            self.day
        )
    }

    pub fn input_url(&self, base_url: &str) -> String {
        format!("{}/input", self.page_url(base_url))
    }

    pub fn project_name(&self, language: Language) -> String {
        format!("aoc_{}_day_{}_{}", self.year, self.padded_day(), language)
    }
}

fn current_year() -> u32 {
    chrono::Local::now().year().max(0) as u32
}

fn validate_year(year: u32, current: u32) -> Result<u32, PuzzleError> {
    if year < FIRST_YEAR {
        return Err(PuzzleError::YearTooEarly(year));
    }
    if year > current + 1 {
        return Err(PuzzleError::YearTooLate { year, current });
    }
    Ok(year)
}

/// clap value parser for `--year`.
pub fn parse_year(value: &str) -> Result<u32, PuzzleError> {
    let year = value
        .trim()
        .parse::<u32>()
        .map_err(|_| PuzzleError::YearFormat(value.to_string()))?;
    validate_year(year, current_year())
}

/// clap value parser for `--day`.
pub fn parse_day(value: &str) -> Result<u32, PuzzleError> {
    let day = value
        .trim()
        .parse::<u32>()
        .map_err(|_| PuzzleError::DayFormat(value.to_string()))?;
    if (1..=LAST_DAY).contains(&day) {
        Ok(day)
    } else {
        Err(PuzzleError::DayOutOfRange(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_should_be_enforced() {
        assert_eq!(validate_year(2015, 2024), Ok(2015));
        assert_eq!(validate_year(2025, 2024), Ok(2025));
        assert_eq!(validate_year(2014, 2024), Err(PuzzleError::YearTooEarly(2014)));
        assert_eq!(
            validate_year(2026, 2024),
            Err(PuzzleError::YearTooLate {
                year: 2026,
                current: 2024
            })
        );
        assert!(matches!(parse_year("twenty"), Err(PuzzleError::YearFormat(_))));
    }

    #[test]
    fn day_bounds_should_be_enforced() {
        assert_eq!(parse_day("1"), Ok(1));
        assert_eq!(parse_day("25"), Ok(25));
        assert_eq!(parse_day("26"), Err(PuzzleError::DayOutOfRange(26)));
        assert_eq!(parse_day("0"), Err(PuzzleError::DayOutOfRange(0)));
        assert_eq!(
            parse_day("seven"),
            Err(PuzzleError::DayFormat("seven".to_string()))
        );
        assert!(parse_day("-3").unwrap_err().to_string().contains("'-3'"));
        assert!(Puzzle::new(2020, 0).is_err());
    }

    #[test]
    fn urls_and_names_should_work() {
        let puzzle = Puzzle::new(2020, 7).unwrap();
        assert_eq!(puzzle.padded_day(), "07");
        assert_eq!(
            puzzle.page_url("https://adventofcode.com/"),
            "https://adventofcode.com/2020/day/7"
        );
        assert_eq!(
            puzzle.input_url("https://adventofcode.com"),
            "https://adventofcode.com/2020/day/7/input"
        );
        assert_eq!(puzzle.project_name(Language::Go), "aoc_2020_day_07_go");
    }
}
