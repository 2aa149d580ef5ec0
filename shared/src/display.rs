//! Date, month and currency rendering.
//!
//! Calendar dates travel in three shapes: the `YYYY-MM-DD` value of a date
//! input, the full UTC timestamp sent to the backend, and the long-form text
//! shown to the user. Month keys (`YYYY-MM`) come from the statistics
//! snapshot.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use std::str::FromStr;
use thiserror::Error;

use crate::CURRENCY_SYMBOL;

/// Format of `<input type="date">` values
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const RU_MONTHS: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь",
    "июль", "август", "сентябрь", "октябрь", "ноябрь", "декабрь",
];

// Genitive forms, used after a day number
const RU_MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DateError {
    #[error("invalid calendar date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
}

/// Language used for long dates and month labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    #[default]
    English,
    Russian,
}

impl FromStr for DisplayLocale {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "english" => Ok(DisplayLocale::English),
            "ru" | "ru-ru" | "ru_ru" | "russian" => Ok(DisplayLocale::Russian),
            other => Err(DateError::UnknownLocale(other.to_string())),
        }
    }
}

impl DisplayLocale {
    /// e.g. "January 10, 2024" / "10 января 2024 г."
    pub fn long_date(&self, date: NaiveDate) -> String {
        let index = date.month0() as usize;
        match self {
            DisplayLocale::English => {
                format!("{} {}, {}", EN_MONTHS[index], date.day(), date.year())
            }
            DisplayLocale::Russian => {
                format!("{} {} {} г.", date.day(), RU_MONTHS_GENITIVE[index], date.year())
            }
        }
    }

    /// e.g. "January 2024" / "январь 2024 г."
    pub fn month_label(&self, date: NaiveDate) -> String {
        let index = date.month0() as usize;
        match self {
            DisplayLocale::English => format!("{} {}", EN_MONTHS[index], date.year()),
            DisplayLocale::Russian => format!("{} {} г.", RU_MONTHS[index], date.year()),
        }
    }
}

pub fn parse_input_date(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(value.to_string()))
}

pub fn input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

/// Convert a date input value into the timestamp the backend stores,
/// midnight UTC with millisecond precision.
pub fn to_iso_timestamp(value: &str) -> Result<String, DateError> {
    let date = parse_input_date(value)?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DateError::InvalidDate(value.to_string()))?;
    Ok(Utc
        .from_utc_datetime(&midnight)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Calendar date of a backend timestamp, read in UTC.
/// Plain `YYYY-MM-DD` values are accepted as well.
pub fn calendar_date(timestamp: &str) -> Option<NaiveDate> {
    let trimmed = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }
    parse_input_date(trimmed).ok()
}

/// `YYYY-MM-DD` value for editing an existing expense; `fallback` when the
/// stored timestamp is unreadable.
pub fn timestamp_to_input_date(timestamp: &str, fallback: NaiveDate) -> String {
    input_date(calendar_date(timestamp).unwrap_or(fallback))
}

/// Long-form date for lists; unreadable values are shown as they came.
pub fn format_long_date(timestamp: &str, locale: DisplayLocale) -> String {
    match calendar_date(timestamp) {
        Some(date) => locale.long_date(date),
        None => timestamp.to_string(),
    }
}

/// Label for a `YYYY-MM` statistics key; unreadable keys are shown as they came.
pub fn format_month_key(key: &str, locale: DisplayLocale) -> String {
    match parse_input_date(&format!("{}-01", key.trim())) {
        Ok(date) => locale.month_label(date),
        Err(_) => key.to_string(),
    }
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// e.g. "3.50 ₽"
pub fn format_currency(value: f64) -> String {
    format!("{:.2} {}", value, CURRENCY_SYMBOL)
}
