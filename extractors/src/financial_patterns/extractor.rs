use super::{extract_amount, is_financial_on, summarize};
use chrono::{Local, NaiveDate};

/// Amount and description pulled out of a financial message
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTransaction {
    /// Negative = debit, positive = credit, 0.0 when no amount was found
    pub amount: f64,
    pub summary: String,
}

impl ExtractedTransaction {
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

/// Detection and extraction over one message, with the calendar day used
/// for mandate checks either taken from the local clock or pinned.
#[derive(Debug, Clone, Default)]
pub struct FinancialPatternExtractor {
    pinned_date: Option<NaiveDate>,
}

impl FinancialPatternExtractor {
    pub fn new() -> Self {
        Self { pinned_date: None }
    }

    /// Evaluates mandates against `date` instead of today.
    pub fn with_date(date: NaiveDate) -> Self {
        Self {
            pinned_date: Some(date),
        }
    }

    fn today(&self) -> NaiveDate {
        self.pinned_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Same decision as [`super::is_financial`], against this extractor's day.
    pub fn is_financial(&self, text: &str) -> bool {
        is_financial_on(text, self.today())
    }

    /// Extracts the signed amount, then builds the summary from it.
    pub fn extract(&self, text: &str) -> ExtractedTransaction {
        let amount = extract_amount(text);
        let summary = summarize(text, amount);
        ExtractedTransaction { amount, summary }
    }

    /// Detection followed by extraction; `None` for non-financial text.
    pub fn extract_if_financial(&self, text: &str) -> Option<ExtractedTransaction> {
        if self.is_financial(text) {
            Some(self.extract(text))
        } else {
            None
        }
    }
}
