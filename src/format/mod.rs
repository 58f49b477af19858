//! Locale-style formatting of structured values, German convention: amounts
//! with two fraction digits, `.` thousands grouping and `,` decimal mark;
//! long month and date labels. The engine itself emits plain numbers and
//! dates; everything here is presentation.

use chrono::{Datelike, NaiveDate};

use crate::errors::{PlanError, Result};
use crate::plan::YearMonth;

const MONTH_NAMES: [&str; 12] = [
    "Januar",
    "Februar",
    "M\u{e4}rz",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Formats an amount with exactly two fraction digits, e.g. `1.234,56`.
pub fn format_amount(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));
    let grouped = group_thousands(int_part);
    // round-trips like -0.001 must not render as "-0,00"
    let negative = value < 0.0 && !(grouped == "0" && frac_part == "00");
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{frac_part}")
}

/// Month label in the form `Januar 2025`.
pub fn month_label(month: YearMonth) -> String {
    format!("{} {}", month_name(month.month), month.year)
}

/// Full date label in the form `15. August 2025`.
pub fn date_label(date: NaiveDate) -> String {
    format!("{}. {} {}", date.day(), month_name(date.month()), date.year())
}

/// Normalizes user input in the locale convention (`1.234,56`) into a number.
/// Plain `1234.56` style input is accepted as well.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PlanError::Validation("amount must not be empty".into()));
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    let value: f64 = normalized
        .parse()
        .map_err(|_| PlanError::Validation(format!("`{trimmed}` is not a valid amount")))?;
    if !value.is_finite() {
        return Err(PlanError::Validation(format!("`{trimmed}` is not a valid amount")));
    }
    Ok(value)
}

/// Parses an ISO calendar date (`2025-08-15`).
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::Validation(format!("`{}` is not a valid date (YYYY-MM-DD)", input.trim())))
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
