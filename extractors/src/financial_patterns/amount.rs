use super::{contains_any, AMOUNT_CONTEXT_KEYWORDS, DEBIT_KEYWORDS};
use regex::Regex;
use shared_types::ParseError;
use std::sync::OnceLock;

/// Characters inspected on each side of a candidate number
const CONTEXT_RADIUS: usize = 20;

/// Digits with optional grouping commas and up to two decimals
fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9,]+\.?[0-9]{0,2}").expect("invalid number regex"))
}

/// Extracts the signed transaction amount from a message.
///
/// Numbers are tried left to right. A number counts only when a currency or
/// transaction keyword appears within 20 characters of it; the first such
/// number wins. It is negative when a debit keyword (`debited`, `spent`,
/// `sent`, `paid`) is in the same window. Returns 0.0 when nothing qualifies.
pub fn extract_amount(text: &str) -> f64 {
    for candidate in number_re().find_iter(text) {
        let window =
            context_window(text, candidate.start(), candidate.end(), CONTEXT_RADIUS).to_lowercase();

        if !contains_any(&window, AMOUNT_CONTEXT_KEYWORDS) {
            continue;
        }

        let amount = match parse_amount(candidate.as_str()) {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!("Could not parse amount: {}", e);
                continue;
            }
        };

        if contains_any(&window, DEBIT_KEYWORDS) {
            tracing::debug!("Expense found: {}", -amount);
            return -amount;
        }
        tracing::debug!("Income/other found: {}", amount);
        return amount;
    }

    tracing::debug!("No financial amount found in the text");
    0.0
}

/// Parses a matched number after stripping grouping commas.
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|_| ParseError::Amount(raw.to_string()))
}

/// Slice of `text` reaching `radius` characters before `start` and after
/// `end`, clamped to the text bounds. Offsets are byte offsets on char
/// boundaries; the radius counts characters.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let window_end = text[end..]
        .char_indices()
        .take(radius)
        .last()
        .map(|(i, c)| end + i + c.len_utf8())
        .unwrap_or(end);

    &text[window_start..window_end]
}
