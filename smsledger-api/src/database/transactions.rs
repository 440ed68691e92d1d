use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{params, types::Type, Row};
use shared_types::{Category, Icon, NewTransaction, SpendingSummary, Transaction};

fn conversion_error(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let category_str: String = row.get(2)?;
    let category = Category::parse(&category_str)
        .ok_or_else(|| conversion_error(2, format!("unknown category: {}", category_str)))?;

    let icon_str: String = row.get(4)?;
    let icon = Icon::parse(&icon_str)
        .ok_or_else(|| conversion_error(4, format!("unknown icon: {}", icon_str)))?;

    Ok(Transaction {
        id: row.get(0)?,
        description: row.get(1)?,
        category,
        amount: row.get(3)?,
        icon,
        occurred_at: row.get(5)?,
    })
}

/// Rows with exactly this description and timestamp
pub async fn count_matching(
    conn: AsyncDbConnection,
    description: &str,
    occurred_at: i64,
) -> Result<i64> {
    let conn = conn.lock().await?;

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE description = ? AND occurred_at = ?",
        params![description, occurred_at],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Inserts unless the row is rejected. Returns `None` when the insert was
/// skipped, which covers both an existing row with the same description and
/// timestamp and a row refused by the Spam check.
pub async fn insert_transaction(
    conn: AsyncDbConnection,
    transaction: &NewTransaction,
) -> Result<Option<Transaction>> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp_millis();

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO transactions
         (description, category, amount, icon, occurred_at, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            &transaction.description,
            transaction.category.as_str(),
            transaction.amount,
            transaction.icon.resource_name(),
            transaction.occurred_at,
            now,
        ],
    )?;

    if inserted == 0 {
        return Ok(None);
    }

    Ok(Some(transaction.clone().with_id(conn.last_insert_rowid())))
}

/// All transactions, most recent first
pub async fn list_transactions(conn: AsyncDbConnection) -> Result<Vec<Transaction>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, description, category, amount, icon, occurred_at
         FROM transactions
         ORDER BY occurred_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([], row_to_transaction)?;

    let mut transactions = Vec::new();
    for row in rows {
        transactions.push(row?);
    }

    Ok(transactions)
}

/// Debit totals by spending group plus the signed net over all rows
pub async fn get_spending_summary(conn: AsyncDbConnection) -> Result<SpendingSummary> {
    let conn = conn.lock().await?;

    let summary = conn.query_row(
        "SELECT
            COALESCE(SUM(CASE WHEN amount < 0 THEN -amount ELSE 0.0 END), 0.0),
            COALESCE(SUM(CASE WHEN amount < 0 AND category IN ('Food', 'Transport') THEN -amount ELSE 0.0 END), 0.0),
            COALESCE(SUM(CASE WHEN amount < 0 AND category IN ('Shopping', 'Subscription') THEN -amount ELSE 0.0 END), 0.0),
            COALESCE(SUM(amount), 0.0),
            COUNT(*)
         FROM transactions",
        [],
        |row| {
            Ok(SpendingSummary {
                net_spend: row.get(0)?,
                essentials: row.get(1)?,
                non_essentials: row.get(2)?,
                net_amount: row.get(3)?,
                transaction_count: row.get(4)?,
            })
        },
    )?;

    Ok(summary)
}

pub async fn delete_all_transactions(conn: AsyncDbConnection) -> Result<usize> {
    let conn = conn.lock().await?;
    let deleted = conn.execute("DELETE FROM transactions", [])?;
    Ok(deleted)
}

pub async fn delete_transaction(conn: AsyncDbConnection, id: i64) -> Result<bool> {
    let conn = conn.lock().await?;
    let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn open_db(dir: &tempfile::TempDir) -> Database {
        Database::new(&dir.path().join("test.sqlite")).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_list_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let conn = db.async_connection.clone();

        let older = NewTransaction::classified("Paid Rs.120 To Cafe", Category::Food, -120.0, 1_000);
        let newer = NewTransaction::classified("Received Rs.5000 From Acme", Category::Income, 5000.0, 2_000);

        insert_transaction(conn.clone(), &older).await.unwrap();
        let stored = insert_transaction(conn.clone(), &newer).await.unwrap().unwrap();
        assert_eq!(stored.icon, Icon::Income);

        let listed = list_transactions(conn).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], stored);
        assert_eq!(listed[1].description, "Paid Rs.120 To Cafe");
        assert_eq!(listed[1].icon, Icon::Food);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let conn = db.async_connection.clone();

        let txn = NewTransaction::classified("Sent Rs.500 To john@bank", Category::Transfer, -500.0, 42);

        assert!(insert_transaction(conn.clone(), &txn).await.unwrap().is_some());
        assert!(insert_transaction(conn.clone(), &txn).await.unwrap().is_none());
        assert_eq!(count_matching(conn.clone(), &txn.description, 42).await.unwrap(), 1);
        assert_eq!(count_matching(conn, &txn.description, 43).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_one_and_all() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let conn = db.async_connection.clone();

        let first = insert_transaction(
            conn.clone(),
            &NewTransaction::classified("Paid Rs.40 To Metro", Category::Transport, -40.0, 1),
        )
        .await
        .unwrap()
        .unwrap();
        insert_transaction(
            conn.clone(),
            &NewTransaction::classified("Paid Rs.99 To Stream", Category::Subscription, -99.0, 2),
        )
        .await
        .unwrap();

        assert!(delete_transaction(conn.clone(), first.id).await.unwrap());
        assert!(!delete_transaction(conn.clone(), first.id).await.unwrap());
        assert_eq!(delete_all_transactions(conn.clone()).await.unwrap(), 1);
        assert!(list_transactions(conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spending_summary_groups_debits() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let conn = db.async_connection.clone();

        assert_eq!(
            get_spending_summary(conn.clone()).await.unwrap(),
            SpendingSummary::default()
        );

        let rows = [
            ("Sent Rs.120 to Cafe", Category::Food, -120.0),
            ("Sent Rs.80 to Metro", Category::Transport, -80.0),
            ("Sent Rs.300 to Store", Category::Shopping, -300.0),
            ("Sent Rs.99 to Stream", Category::Subscription, -99.0),
            ("Sent Rs.1000 to Landlord", Category::Transfer, -1000.0),
            ("Received Rs.5000 from Acme", Category::Income, 5000.0),
            // refund credited under a spending category
            ("Received Rs.50 from Store", Category::Shopping, 50.0),
        ];
        for (i, (description, category, amount)) in rows.into_iter().enumerate() {
            insert_transaction(
                conn.clone(),
                &NewTransaction::classified(description, category, amount, i as i64),
            )
            .await
            .unwrap();
        }

        let summary = get_spending_summary(conn).await.unwrap();
        assert_eq!(summary.net_spend, 1599.0);
        assert_eq!(summary.essentials, 200.0);
        assert_eq!(summary.non_essentials, 399.0);
        assert_eq!(summary.net_amount, 3451.0);
        assert_eq!(summary.transaction_count, 7);
    }

    #[tokio::test]
    async fn test_created_at_is_millis() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let before = chrono::Utc::now().timestamp_millis();
        insert_transaction(
            db.async_connection.clone(),
            &NewTransaction::classified("Sent Rs.5", Category::Food, -5.0, before),
        )
        .await
        .unwrap();

        let conn = db.async_connection.lock().await.unwrap();
        let created_at: i64 = conn
            .query_row("SELECT created_at FROM transactions", [], |row| row.get(0))
            .unwrap();
        assert!(created_at >= before);
        assert!(created_at < before + 60_000);
    }

    #[tokio::test]
    async fn test_spam_insert_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let conn = db.async_connection.clone();

        let spam = NewTransaction::classified("Received Rs.10000", Category::Spam, 10000.0, 1);
        assert!(insert_transaction(conn.clone(), &spam).await.unwrap().is_none());
        assert!(list_transactions(conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reopening_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = open_db(&dir);
            insert_transaction(
                db.async_connection.clone(),
                &NewTransaction::classified("Paid Rs.10 To Shop", Category::Shopping, -10.0, 5),
            )
            .await
            .unwrap();
        }

        let db = open_db(&dir);
        assert_eq!(list_transactions(db.async_connection.clone()).await.unwrap().len(), 1);
    }
}
