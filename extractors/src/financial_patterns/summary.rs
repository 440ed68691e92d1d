use regex::Regex;
use std::sync::OnceLock;

/// `Rs.500`, `Rs 1,200.50`, `INR 99`, `₹20`
fn currency_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:Rs\.?|INR|₹)\s*([0-9,]+\.?[0-9]{0,2})")
            .expect("invalid currency amount regex")
    })
}

/// `To John Doe`, `VPA john.doe@okaxis`, `To VPA john.doe@okaxis`
fn recipient_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:To\s*(?:VPA\b)?|\bVPA\b)\s*([A-Za-z0-9._-]+@[A-Za-z0-9.]+|[A-Za-z\s]+(?:\s[A-Za-z]+)*)",
        )
        .expect("invalid recipient regex")
    })
}

/// `From ABC Bank`, `From Asha`
fn sender_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"From\s*([A-Za-z\s]+(?:Bank)?)").expect("invalid sender regex"))
}

/// Builds the canonical description stored with a transaction.
///
/// Debits read `Sent <amount> to <recipient>`, credits (and zero amounts)
/// read `Received <amount> from <sender>`. The amount is the first currency
/// amount exactly as written in the message. Text without one is returned
/// unchanged.
pub fn summarize(text: &str, amount: f64) -> String {
    let Some(amount_match) = currency_amount_re().find(text) else {
        return text.to_string();
    };
    let matched = amount_match.as_str();

    if amount < 0.0 {
        let recipient = recipient_re()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| format!(" to {}", m.as_str().trim()))
            .unwrap_or_default();
        format!("Sent {}{}", matched, recipient)
    } else {
        let sender = sender_re()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| format!(" from {}", m.as_str().trim()))
            .unwrap_or_default();
        format!("Received {}{}", matched, sender)
    }
}
