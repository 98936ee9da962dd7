//! Versioned schema for the news store.
//!
//! Each entry in [`MIGRATIONS`] is applied at most once, inside its own
//! transaction together with the `_migrations` row recording it. A failing
//! batch leaves neither partial schema nor a version row behind.

use chrono::Utc;
use tokio_rusqlite::{Connection, params, rusqlite};

use super::Error;

/// Schema versions in ascending order.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../../migrations/001_news.sql"))];

const VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
)";

/// Bring the schema up to the latest version.
///
/// # Errors
///
/// `Error::MigrationFailed` names the version whose batch was rejected;
/// other storage failures surface as `Error::Database`.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| apply(conn, MIGRATIONS).map(|_| ())).await.map_err(Error::from)
}

/// Apply every entry newer than the recorded version. Returns how many ran.
fn apply(conn: &mut rusqlite::Connection, migrations: &[(i64, &str)]) -> Result<usize, Error> {
    conn.execute(VERSION_TABLE, [])?;
    let current: i64 = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

    let mut applied = 0;
    for &(version, sql) in migrations.iter().filter(|(version, _)| *version > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| Error::MigrationFailed(format!("version {version}: {e}")))?;
        tx.execute(
            "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
            params![version, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;

        tracing::info!(version, "applied news schema migration");
        applied += 1;
    }

    Ok(applied)
}
