use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    // Spam is never persisted
    conn.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description VARCHAR NOT NULL,
            category VARCHAR NOT NULL CHECK (category IN ('Food', 'Groceries', 'Income', 'Shopping', 'Subscription', 'Transfer', 'Transport', 'Utilities')),
            amount DOUBLE NOT NULL,
            icon VARCHAR NOT NULL,
            occurred_at BIGINT NOT NULL,
            created_at BIGINT NOT NULL,
            UNIQUE (description, occurred_at)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_occurred_at ON transactions(occurred_at DESC)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_spam_rows_are_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO transactions (description, category, amount, icon, occurred_at, created_at)
             VALUES ('win a prize', 'Spam', 0.0, 'ic_credit', 1, 1)",
            [],
        );
        assert!(result.is_err());
    }
}
