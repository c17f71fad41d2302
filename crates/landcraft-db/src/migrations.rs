use landcraft_common::{Error, Result};
use rusqlite::{Connection, params};
use tracing::debug;

/// A versioned schema change. `up` applies it, `down` reverts it.
///
/// Applied versions are tracked in a `_migrations` table so re-running the
/// runner is a no-op for anything already applied.
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "0001_job",
    up: "CREATE TABLE job (
            id TEXT PRIMARY KEY,
            job_type TEXT NOT NULL CHECK (job_type IN ('CREATE', 'EDIT')),
            job_status TEXT NOT NULL CHECK (job_status IN ('NEW', 'DONE')),
            args TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_job_type_status ON job(job_type, job_status);",
    down: "DROP INDEX idx_job_type_status;
        DROP TABLE job;",
}];

/// Run a whitespace-tokenized migration command and return its log lines.
///
/// An empty token list is a no-op with an empty log. Recognized commands:
/// `up`, `down`, `status`. Anything else is an `Error::Migration`.
pub fn run(conn: &mut Connection, tokens: &[&str]) -> Result<Vec<String>> {
    let Some(command) = tokens.first() else {
        return Ok(Vec::new());
    };

    let mut log = Vec::new();
    match *command {
        "up" => up(conn, &mut log)?,
        "down" => down(conn, &mut log)?,
        "status" => status(conn, &mut log)?,
        other => {
            return Err(Error::Migration(format!(
                "unknown migration command: {other}"
            )));
        }
    }

    for line in &log {
        debug!("migrate: {line}");
    }
    Ok(log)
}

fn up(conn: &mut Connection, log: &mut Vec<String>) -> Result<()> {
    ensure_tracking_table(conn)?;
    let applied = applied_versions(conn)?;

    let mut pending = 0;
    for migration in MIGRATIONS {
        if applied.contains(&migration.version) {
            continue;
        }
        let tx = conn
            .transaction()
            .map_err(|e| Error::Migration(format!("failed to begin transaction: {e}")))?;
        tx.execute_batch(migration.up)
            .map_err(|e| Error::Migration(format!("{} failed: {e}", migration.name)))?;
        tx.execute(
            "INSERT INTO _migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )
        .map_err(|e| Error::Migration(format!("failed to record {}: {e}", migration.name)))?;
        tx.commit()
            .map_err(|e| Error::Migration(format!("failed to commit {}: {e}", migration.name)))?;

        log.push(format!("applied {}", migration.name));
        pending += 1;
    }

    if pending == 0 {
        log.push("no pending migrations".to_string());
    }
    Ok(())
}

fn down(conn: &mut Connection, log: &mut Vec<String>) -> Result<()> {
    ensure_tracking_table(conn)?;
    let applied = applied_versions(conn)?;

    let Some(last) = MIGRATIONS
        .iter()
        .filter(|m| applied.contains(&m.version))
        .max_by_key(|m| m.version)
    else {
        log.push("no applied migrations".to_string());
        return Ok(());
    };

    let tx = conn
        .transaction()
        .map_err(|e| Error::Migration(format!("failed to begin transaction: {e}")))?;
    tx.execute_batch(last.down)
        .map_err(|e| Error::Migration(format!("revert of {} failed: {e}", last.name)))?;
    tx.execute(
        "DELETE FROM _migrations WHERE version = ?1",
        params![last.version],
    )
    .map_err(|e| Error::Migration(format!("failed to unrecord {}: {e}", last.name)))?;
    tx.commit()
        .map_err(|e| Error::Migration(format!("failed to commit revert of {}: {e}", last.name)))?;

    log.push(format!("reverted {}", last.name));
    Ok(())
}

fn status(conn: &mut Connection, log: &mut Vec<String>) -> Result<()> {
    ensure_tracking_table(conn)?;
    let applied = applied_versions(conn)?;

    for migration in MIGRATIONS {
        let state = if applied.contains(&migration.version) {
            "applied"
        } else {
            "pending"
        };
        log.push(format!("{}: {state}", migration.name));
    }
    Ok(())
}

fn ensure_tracking_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(|e| Error::Migration(format!("failed to create tracking table: {e}")))?;
    Ok(())
}

fn applied_versions(conn: &Connection) -> Result<Vec<u32>> {
    let mut stmt = conn
        .prepare("SELECT version FROM _migrations ORDER BY version ASC")
        .map_err(|e| Error::Migration(format!("failed to query tracking table: {e}")))?;
    let rows = stmt
        .query_map([], |row| row.get(0))
        .map_err(|e| Error::Migration(format!("failed to read tracking table: {e}")))?;

    let mut versions = Vec::new();
    for row in rows {
        versions.push(row.map_err(|e| Error::Migration(format!("bad tracking row: {e}")))?);
    }
    Ok(versions)
}
