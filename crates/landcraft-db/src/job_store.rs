use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use landcraft_common::{Error, Result};
use rusqlite::{Connection, params, params_from_iter};
use tracing::{debug, info};
use uuid::Uuid;

use crate::job::{Job, JobStatus, JobType};
use crate::migrations;

/// Persistent storage for jobs.
///
/// Schema is managed by the migration runner; the store itself never
/// creates the `job` table. Queries against an unmigrated database fail
/// with `Error::Database`.
pub struct JobStore {
    conn: Mutex<Connection>,
    log_statements: bool,
}

impl JobStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("opening job store at {}", db_path.display());
        let conn = Connection::open(db_path)
            .map_err(|e| Error::Database(format!("failed to open database: {e}")))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::Database(format!("failed to open in-memory database: {e}")))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| Error::Database(format!("failed to set pragmas: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
            log_statements: false,
        })
    }

    /// Log each statement at debug level. Driven by `database.log` in the
    /// config.
    pub fn with_statement_logging(mut self, enabled: bool) -> Self {
        self.log_statements = enabled;
        self
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Database("job store lock poisoned".into()))
    }

    fn trace(&self, sql: &str) {
        if self.log_statements {
            debug!("sql: {sql}");
        }
    }

    /// Run a tokenized migration command against this store's connection
    /// and return the runner's log lines.
    pub fn migrate(&self, tokens: &[&str]) -> Result<Vec<String>> {
        let mut conn = self.connection()?;
        migrations::run(&mut conn, tokens)
    }

    /// Insert a new job with status `NEW` and a fresh UUIDv7 id.
    pub fn create_job(&self, job_type: JobType, args: &str) -> Result<Job> {
        let id = Uuid::now_v7().to_string();
        let sql = "INSERT INTO job (id, job_type, job_status, args) VALUES (?1, ?2, ?3, ?4)";
        self.trace(sql);

        {
            let conn = self.connection()?;
            conn.execute(
                sql,
                params![id, job_type.as_str(), JobStatus::New.as_str(), args],
            )
            .map_err(|e| Error::Database(format!("failed to create job: {e}")))?;
        }

        self.get_job(&id)?
            .ok_or_else(|| Error::Database(format!("job {id} vanished after insert")))
    }

    pub fn get_job(&self, id: &str) -> Result<Option<Job>> {
        let sql = "SELECT id, job_type, job_status, args, created_at FROM job WHERE id = ?1";
        self.trace(sql);

        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        match stmt.query_row(params![id], row_to_job) {
            Ok(job) => Ok(Some(job)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Error::Database(format!("failed to fetch job: {e}"))),
        }
    }

    /// Jobs of one type in any of the given statuses, oldest first.
    pub fn list_jobs(&self, job_type: JobType, statuses: &[JobStatus]) -> Result<Vec<Job>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (2..statuses.len() + 2)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id, job_type, job_status, args, created_at
             FROM job
             WHERE job_type = ?1 AND job_status IN ({placeholders})
             ORDER BY id ASC"
        );
        self.trace(&sql);

        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| Error::Database(format!("failed to prepare query: {e}")))?;

        let mut bindings = vec![job_type.as_str()];
        bindings.extend(statuses.iter().map(|s| s.as_str()));

        let rows = stmt
            .query_map(params_from_iter(bindings), row_to_job)
            .map_err(|e| Error::Database(format!("failed to query jobs: {e}")))?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row.map_err(|e| Error::Database(format!("failed to read job row: {e}")))?);
        }
        Ok(jobs)
    }

    pub fn update_job_status(&self, id: &str, new_status: JobStatus) -> Result<()> {
        let sql = "UPDATE job SET job_status = ?1 WHERE id = ?2";
        self.trace(sql);

        let conn = self.connection()?;
        let updated = conn
            .execute(sql, params![new_status.as_str(), id])
            .map_err(|e| Error::Database(format!("failed to update job status: {e}")))?;

        if updated == 0 {
            return Err(Error::NotFound(format!("job {id}")));
        }
        Ok(())
    }

    pub fn job_count(&self) -> Result<usize> {
        let sql = "SELECT COUNT(*) FROM job";
        self.trace(sql);

        let conn = self.connection()?;
        let count: i64 = conn
            .query_row(sql, [], |row| row.get(0))
            .map_err(|e| Error::Database(format!("failed to count jobs: {e}")))?;
        Ok(count as usize)
    }
}

fn row_to_job(row: &rusqlite::Row<'_>) -> rusqlite::Result<Job> {
    use rusqlite::types::Type;

    let job_type: String = row.get(1)?;
    let job_status: String = row.get(2)?;
    Ok(Job {
        id: row.get(0)?,
        job_type: job_type
            .parse()
            .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?,
        job_status: job_status
            .parse()
            .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?,
        args: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            // SQLite datetime('now') produces "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
                .map(|naive| naive.and_utc())
                .unwrap_or_else(|_| Utc::now())
        })
}
