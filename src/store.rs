use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rusqlite::{Connection, params};

use crate::detail::ProjectRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

/// SQLite-backed project table, keyed by `list_id`. A connection is opened
/// and closed per operation; the single scraper process is the only writer.
pub struct ProjectStore {
    db_path: PathBuf,
}

impl ProjectStore {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    fn connect(&self) -> anyhow::Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("open project db: {}", self.db_path.display()))
    }

    /// Idempotent; safe to call on every process start.
    pub fn ensure_schema(&self) -> anyhow::Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                list_id TEXT PRIMARY KEY,
                title TEXT,
                price TEXT,
                status TEXT,
                url TEXT,
                hash TEXT
            );
            "#,
        )
        .context("create projects table")?;
        Ok(())
    }

    /// Reconcile one freshly observed record against the stored row, writing
    /// only when the fingerprint differs. Store failures propagate; durable
    /// storage is assumed available.
    pub fn upsert(&self, record: &ProjectRecord) -> anyhow::Result<UpsertOutcome> {
        let conn = self.connect()?;

        let stored_hash = match conn.query_row(
            "SELECT hash FROM projects WHERE list_id = ?1",
            params![record.list_id],
            |row| row.get::<_, String>(0),
        ) {
            Ok(hash) => Some(hash),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(err) => return Err(err).context("read stored hash"),
        };

        match stored_hash {
            None => {
                conn.execute(
                    r#"
                    INSERT INTO projects (list_id, title, price, status, url, hash)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        record.list_id,
                        record.title,
                        record.price,
                        record.status,
                        record.url,
                        record.fingerprint,
                    ],
                )
                .context("insert project")?;
                tracing::info!(title = %record.title, id = %record.list_id, "new project added");
                Ok(UpsertOutcome::Inserted)
            }
            Some(hash) if hash != record.fingerprint => {
                conn.execute(
                    r#"
                    UPDATE projects
                    SET title = ?1, price = ?2, status = ?3, url = ?4, hash = ?5
                    WHERE list_id = ?6
                    "#,
                    params![
                        record.title,
                        record.price,
                        record.status,
                        record.url,
                        record.fingerprint,
                        record.list_id,
                    ],
                )
                .context("update project")?;
                tracing::info!(title = %record.title, id = %record.list_id, "project updated");
                Ok(UpsertOutcome::Updated)
            }
            Some(_) => {
                tracing::debug!(title = %record.title, id = %record.list_id, "no change in project");
                Ok(UpsertOutcome::Unchanged)
            }
        }
    }

    pub fn get(&self, list_id: &str) -> anyhow::Result<Option<ProjectRecord>> {
        let conn = self.connect()?;

        let row = conn.query_row(
            "SELECT list_id, title, price, status, url, hash FROM projects WHERE list_id = ?1",
            params![list_id],
            |row| {
                Ok(ProjectRecord {
                    list_id: row.get(0)?,
                    title: row.get(1)?,
                    price: row.get(2)?,
                    status: row.get(3)?,
                    url: row.get(4)?,
                    fingerprint: row.get(5)?,
                })
            },
        );

        match row {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err).context("read project row"),
        }
    }

    pub fn count(&self) -> anyhow::Result<u64> {
        let conn = self.connect()?;
        let count: u64 = conn
            .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
            .context("count project rows")?;
        Ok(count)
    }
}
