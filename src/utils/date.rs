//! Locale-tolerant date normalization.
//!
//! Spreadsheet exports carry dates in whatever shape the person typing them
//! chose: `6/30/2003`, `07/1990`, `Jul-92`, `January 2020`, `2003-06-30`.
//! [`parse_date`] accepts all of these and fills missing components from a
//! fixed reference date, so the output never depends on the day the build
//! runs.
//!
//! # Examples
//!
//! ```ignore
//! assert_eq!(format_date("07/1990", DateStyle::Iso), "1990-07-01");
//! assert_eq!(format_date("07/1990", DateStyle::MonthYear), "July 1990");
//! assert_eq!(format_date("not a date", DateStyle::Iso), "not a date");
//! ```

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::log;

/// `Jul-92`: a month name hyphen-joined to a two-digit year.
static MONTH_DASH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3,}\.?-\d{2}$").unwrap());

/// Reference date supplying missing components (day 1, month 1, year 2000).
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Display format of a normalized date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `YYYY-MM-DD`
    Iso,
    /// `Month YYYY`
    MonthYear,
}

impl DateStyle {
    pub fn format(self, date: NaiveDate) -> String {
        match self {
            Self::Iso => date.format("%Y-%m-%d").to_string(),
            Self::MonthYear => date.format("%B %Y").to_string(),
        }
    }
}

/// Normalize `input` to `style`, passing it through unchanged on failure.
pub fn format_date(input: &str, style: DateStyle) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_date(trimmed, reference_date()) {
        Some(date) => style.format(date),
        None => {
            log!("date"; "error parsing: {}", input);
            input.to_string()
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Numeric value and its digit count.
    Num(u32, usize),
    Month(u32),
}

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Filler words that may appear between date components.
const NOISE: [&str; 3] = ["of", "the", "on"];

/// Parse a free-text date, filling missing parts from `reference`.
///
/// Numeric dates are read month-first (`6/30/2003`), falling back to
/// day-first when the first number cannot be a month. A lone number after
/// a month name is a day unless it cannot be one or is hyphen-joined
/// (`Jul-92`). Two-digit years pivot at 69: `00..=68` are 20xx, `69..=99`
/// are 19xx.
pub fn parse_date(input: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let tokens = tokenize(input)?;
    let month_dash_year = MONTH_DASH_YEAR.is_match(input.trim());

    let mut months = tokens.iter().filter_map(|t| match t {
        Token::Month(m) => Some(*m),
        Token::Num(..) => None,
    });
    let month_name = months.next();
    if months.next().is_some() {
        return None;
    }

    let nums: Vec<(u32, usize)> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Num(v, d) => Some((*v, *d)),
            Token::Month(_) => None,
        })
        .collect();

    let (year, month, day) = match month_name {
        Some(month) => with_month_name(month, &nums, month_dash_year, reference)?,
        None => numeric_only(&nums, reference)?,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();

    for word in input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let lower = word.to_ascii_lowercase();

        if lower.bytes().all(|b| b.is_ascii_digit()) {
            // Guard against absurdly long digit runs
            if lower.len() > 4 {
                return None;
            }
            tokens.push(Token::Num(lower.parse().ok()?, lower.len()));
        } else if let Some(num) = strip_ordinal(&lower) {
            tokens.push(Token::Num(num, 2));
        } else if let Some(month) = month_from_name(&lower) {
            tokens.push(Token::Month(month));
        } else if is_weekday(&lower) || NOISE.contains(&lower.as_str()) {
            continue;
        } else {
            return None;
        }
    }

    (!tokens.is_empty()).then_some(tokens)
}

/// `1st`, `2nd`, `23rd`, `4th` → day number.
fn strip_ordinal(word: &str) -> Option<u32> {
    let digits = word
        .strip_suffix("st")
        .or_else(|| word.strip_suffix("nd"))
        .or_else(|| word.strip_suffix("rd"))
        .or_else(|| word.strip_suffix("th"))?;
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Full names and prefixes of at least three letters (`jul`, `sept`).
fn month_from_name(word: &str) -> Option<u32> {
    if word.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|name| name.starts_with(word))
        .map(|i| i as u32 + 1)
}

fn is_weekday(word: &str) -> bool {
    word.len() >= 3 && WEEKDAYS.iter().any(|name| name.starts_with(word))
}

fn expand_year(value: u32, digits: usize) -> i32 {
    let value = value as i32;
    match digits {
        1 | 2 if value < 69 => 2000 + value,
        1 | 2 => 1900 + value,
        _ => value,
    }
}

#[inline]
fn looks_like_year(value: u32, digits: usize) -> bool {
    digits >= 3 || value > 31
}

fn with_month_name(
    month: u32,
    nums: &[(u32, usize)],
    month_dash_year: bool,
    reference: NaiveDate,
) -> Option<(i32, u32, u32)> {
    match *nums {
        [] => Some((reference.year(), month, reference.day())),
        // "Jul-92", "July 2020" vs "July 4", "July 14"
        [(v, d)] => {
            if looks_like_year(v, d) || month_dash_year {
                Some((expand_year(v, d), month, reference.day()))
            } else {
                Some((reference.year(), month, v))
            }
        }
        [(a, ad), (b, bd)] => {
            if looks_like_year(a, ad) && !looks_like_year(b, bd) {
                Some((expand_year(a, ad), month, b))
            } else {
                Some((expand_year(b, bd), month, a))
            }
        }
        _ => None,
    }
}

fn numeric_only(nums: &[(u32, usize)], reference: NaiveDate) -> Option<(i32, u32, u32)> {
    match *nums {
        [(v, 4)] => Some((v as i32, reference.month(), reference.day())),
        [(a, ad), (b, bd)] => {
            if ad == 4 {
                // 1990-07
                Some((a as i32, b, reference.day()))
            } else if looks_like_year(b, bd) {
                // 07/1990, 7/90
                Some((expand_year(b, bd), a, reference.day()))
            } else {
                // 6/30 in the reference year
                Some((reference.year(), a, b))
            }
        }
        [(a, ad), (b, _), (c, cd)] => {
            if ad == 4 {
                Some((a as i32, b, c))
            } else if a > 12 && b <= 12 {
                // 30/6/2003
                Some((expand_year(c, cd), b, a))
            } else {
                Some((expand_year(c, cd), a, b))
            }
        }
        _ => None,
    }
}
