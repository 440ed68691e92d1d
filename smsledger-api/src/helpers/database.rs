use crate::config::ApiConfig;
use std::path::PathBuf;

/// Returns the path to the ledger database
///
/// Uses `[database] path` from the config when set, otherwise the
/// platform data directory:
///
/// - **macOS**: `~/Library/Application Support/smsledger/db.sqlite`
/// - **Linux**: `~/.local/share/smsledger/db.sqlite`
/// - **Windows**: `%LOCALAPPDATA%\smsledger\db.sqlite`
pub fn get_db_path(config: &ApiConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = config.database.as_ref().and_then(|d| d.path.as_ref()) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("smsledger").join("db.sqlite"))
}

/// Open (or create) the ledger database and run migrations
pub fn initialize_database(
    config: &ApiConfig,
) -> anyhow::Result<std::sync::Arc<crate::database::Database>> {
    let db_path = get_db_path(config)?;
    tracing::info!("Opening database at {}", db_path.display());

    let db = crate::database::Database::new(&db_path)?;
    Ok(std::sync::Arc::new(db))
}
