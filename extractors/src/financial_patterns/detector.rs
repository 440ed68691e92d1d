use super::{contains_any, FINANCIAL_KEYWORDS, MANDATE_MARKER};
use chrono::{Local, NaiveDate};
use regex::Regex;
use shared_types::ParseError;
use std::sync::OnceLock;

/// `on 02/12/25`, `On 02-12-2025`, `on02/12/25`
fn mandate_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)on\s*([0-9]{2}[/-][0-9]{2}[/-][0-9]{2,4})")
            .expect("invalid mandate date regex")
    })
}

/// Decides whether a message is a financial event worth classifying.
///
/// Mandate notifications are only relevant on the day they execute, so any
/// text mentioning `e-mandate` is decided by [`is_mandate_for_today`] alone.
pub fn is_financial(text: &str) -> bool {
    is_financial_on(text, Local::now().date_naive())
}

/// [`is_financial`] with mandates checked against `today`.
pub fn is_financial_on(text: &str, today: NaiveDate) -> bool {
    let lower = text.to_lowercase();

    if lower.contains(MANDATE_MARKER) {
        tracing::debug!("Detected e-mandate message");
        return is_mandate_for_date(text, today);
    }

    let is_financial = contains_any(&lower, FINANCIAL_KEYWORDS);
    tracing::debug!("Financial keyword check result: {}", is_financial);
    is_financial
}

/// True when the mandate's `on <date>` is today's local date.
pub fn is_mandate_for_today(text: &str) -> bool {
    is_mandate_for_date(text, Local::now().date_naive())
}

/// True when the mandate's `on <date>` equals `today`. Messages without a
/// recognisable date, or with one that does not parse, are rejected.
pub fn is_mandate_for_date(text: &str, today: NaiveDate) -> bool {
    match mandate_date(text) {
        Ok(Some(date)) => {
            let is_today = date == today;
            tracing::debug!("E-mandate date {} is today: {}", date, is_today);
            is_today
        }
        Ok(None) => {
            tracing::debug!("E-mandate text has no 'on dd/mm/yy' date");
            false
        }
        Err(e) => {
            tracing::debug!("E-mandate date parse error: {}", e);
            false
        }
    }
}

/// Extracts the execution date of a mandate.
///
/// Separators are normalised to `/`; strings longer than 8 characters are
/// read as `dd/MM/yyyy`, the rest as `dd/MM/yy`.
pub fn mandate_date(text: &str) -> Result<Option<NaiveDate>, ParseError> {
    let Some(caps) = mandate_date_re().captures(text) else {
        return Ok(None);
    };

    let date_str = caps[1].replace('-', "/");
    let format = if date_str.len() > 8 { "%d/%m/%Y" } else { "%d/%m/%y" };

    NaiveDate::parse_from_str(&date_str, format)
        .map(Some)
        .map_err(|e| ParseError::Date(format!("{date_str}: {e}")))
}
