use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Spending category assigned by the classifier.
///
/// Variant order is the classifier's output order: score `i` belongs to
/// `Category::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum Category {
    Food,
    Groceries,
    Income,
    Shopping,
    Spam,
    Subscription,
    Transfer,
    Transport,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Groceries,
        Category::Income,
        Category::Shopping,
        Category::Spam,
        Category::Subscription,
        Category::Transfer,
        Category::Transport,
        Category::Utilities,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Groceries => "Groceries",
            Category::Income => "Income",
            Category::Shopping => "Shopping",
            Category::Spam => "Spam",
            Category::Subscription => "Subscription",
            Category::Transfer => "Transfer",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Category::Spam)
    }

    /// Icon shown next to a transaction of this category. Categories without
    /// a dedicated icon fall back to the generic debit/credit icon.
    pub fn icon(&self, is_debit: bool) -> Icon {
        match self {
            Category::Food => Icon::Food,
            Category::Income => Icon::Income,
            Category::Shopping => Icon::Shopping,
            Category::Subscription => Icon::Subscription,
            Category::Transport => Icon::Transport,
            Category::Groceries | Category::Spam | Category::Transfer | Category::Utilities => {
                if is_debit {
                    Icon::Debit
                } else {
                    Icon::Credit
                }
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Drawable resource rendered by the UI for a transaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
pub enum Icon {
    #[serde(rename = "ic_food")]
    Food,
    #[serde(rename = "ic_income")]
    Income,
    #[serde(rename = "ic_shopping")]
    Shopping,
    #[serde(rename = "ic_subscription")]
    Subscription,
    #[serde(rename = "ic_transport")]
    Transport,
    #[serde(rename = "ic_debit")]
    Debit,
    #[serde(rename = "ic_credit")]
    Credit,
}

impl Icon {
    pub const ALL: [Icon; 7] = [
        Icon::Food,
        Icon::Income,
        Icon::Shopping,
        Icon::Subscription,
        Icon::Transport,
        Icon::Debit,
        Icon::Credit,
    ];

    pub fn resource_name(&self) -> &'static str {
        match self {
            Icon::Food => "ic_food",
            Icon::Income => "ic_income",
            Icon::Shopping => "ic_shopping",
            Icon::Subscription => "ic_subscription",
            Icon::Transport => "ic_transport",
            Icon::Debit => "ic_debit",
            Icon::Credit => "ic_credit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.resource_name() == value)
    }
}

/// A committed transaction as stored by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub category: Category,
    /// Negative = debit/expense, positive = credit/income
    pub amount: f64,
    pub icon: Icon,
    /// Notification post time, epoch milliseconds
    pub occurred_at: i64,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }
}

/// A transaction that has been classified but not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub category: Category,
    pub amount: f64,
    pub icon: Icon,
    pub occurred_at: i64,
}

impl NewTransaction {
    /// Builds the row for a classified message; the icon follows from the
    /// category and the sign of the amount.
    pub fn classified(
        description: impl Into<String>,
        category: Category,
        amount: f64,
        occurred_at: i64,
    ) -> Self {
        Self {
            description: description.into(),
            category,
            amount,
            icon: category.icon(amount < 0.0),
            occurred_at,
        }
    }

    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            description: self.description,
            category: self.category,
            amount: self.amount,
            icon: self.icon,
            occurred_at: self.occurred_at,
        }
    }
}

/// Response for the transaction list endpoint
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// Totals over the ledger. Spending figures are positive magnitudes of
/// debits; `net_amount` is the signed sum of every transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct SpendingSummary {
    pub net_spend: f64,
    /// Food and Transport debits
    pub essentials: f64,
    /// Shopping and Subscription debits
    pub non_essentials: f64,
    pub net_amount: f64,
    pub transaction_count: i64,
}

/// Response for delete endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct DeleteResponse {
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_classifier_output() {
        assert_eq!(Category::from_index(0), Some(Category::Food));
        assert_eq!(Category::from_index(4), Some(Category::Spam));
        assert_eq!(Category::from_index(8), Some(Category::Utilities));
        assert_eq!(Category::from_index(9), None);
    }

    #[test]
    fn test_dedicated_icons_ignore_sign() {
        assert_eq!(Category::Food.icon(true), Icon::Food);
        assert_eq!(Category::Food.icon(false), Icon::Food);
        assert_eq!(Category::Income.icon(true), Icon::Income);
        assert_eq!(Category::Shopping.icon(false), Icon::Shopping);
        assert_eq!(Category::Subscription.icon(true), Icon::Subscription);
        assert_eq!(Category::Transport.icon(false), Icon::Transport);
    }

    #[test]
    fn test_generic_icons_follow_sign() {
        for category in [
            Category::Groceries,
            Category::Spam,
            Category::Transfer,
            Category::Utilities,
        ] {
            assert_eq!(category.icon(true), Icon::Debit);
            assert_eq!(category.icon(false), Icon::Credit);
        }
    }

    #[test]
    fn test_category_and_icon_names_parse_back() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        for icon in Icon::ALL {
            assert_eq!(Icon::parse(icon.resource_name()), Some(icon));
        }
        assert_eq!(Category::parse("food"), None);
    }

    #[test]
    fn test_icon_serializes_as_resource_name() {
        let json = serde_json::to_string(&Icon::Debit).unwrap();
        assert_eq!(json, "\"ic_debit\"");
    }

    #[test]
    fn test_classified_zero_amount_uses_credit_icon() {
        let txn = NewTransaction::classified("Received Rs.0", Category::Transfer, 0.0, 1);
        assert_eq!(txn.icon, Icon::Credit);
        let stored = txn.with_id(7);
        assert_eq!(stored.id, 7);
        assert!(!stored.is_debit());
    }
}
