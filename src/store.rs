use crate::cli::CommonArgs;
use crate::error::{GitcalError, Result};
use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// Version of the repository list schema, stored in `PRAGMA user_version`.
pub const STORE_SCHEMA_VERSION: u32 = 1;

/// Where the list of known repositories lives between runs.
pub trait RepoStore {
    /// Paths in the order they were first added.
    fn load(&self) -> Result<Vec<String>>;
    /// Persist `paths`, keeping whatever is stored already.
    fn save(&mut self, paths: &[String]) -> Result<()>;
}

pub fn exec(common: &CommonArgs) -> anyhow::Result<()> {
    let store = SqliteStore::open(common.store_path()?).context("Failed to open repository store")?;
    let repos = store.load().context("Failed to load repository store")?;
    if repos.is_empty() {
        eprintln!("No repositories known yet, run `gitcal scan <folder>` first");
    }
    for repo in repos {
        println!("{repo}");
    }
    Ok(())
}

/// Append the paths of `discovered` that `existing` does not hold yet.
pub fn merge_paths(existing: &[String], discovered: &[String]) -> Vec<String> {
    let mut merged = existing.to_vec();
    for path in discovered {
        if !merged.contains(path) {
            merged.push(path.clone());
        }
    }
    merged
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(dir) = db_path.as_ref().parent() {
            std::fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(db_path.as_ref())?;
        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS repositories (
                path TEXT PRIMARY KEY,
                added_at INTEGER NOT NULL
            );
            ",
        )?;
        self.check_schema_version()?;
        Ok(())
    }

    fn check_schema_version(&mut self) -> Result<()> {
        let user_version: i64 = self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?;

        if user_version == 0 {
            let set_stmt = format!("PRAGMA user_version = {STORE_SCHEMA_VERSION};");
            self.conn.execute_batch(&set_stmt)?;
        } else if user_version != STORE_SCHEMA_VERSION as i64 {
            return Err(GitcalError::Store(format!(
                "Schema version mismatch: expected {}, found {}",
                STORE_SCHEMA_VERSION, user_version
            )));
        }

        Ok(())
    }
}

impl RepoStore for SqliteStore {
    fn load(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path FROM repositories ORDER BY added_at, rowid")?;
        let paths = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(paths)
    }

    fn save(&mut self, paths: &[String]) -> Result<()> {
        let tx = self.conn.transaction()?;
        let now = Utc::now().timestamp();
        {
            let mut insert =
                tx.prepare("INSERT OR IGNORE INTO repositories (path, added_at) VALUES (?, ?)")?;
            for path in paths {
                insert.execute(params![path, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

/// Store that lives only as long as the value, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    paths: Vec<String>,
}

impl RepoStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>> {
        Ok(self.paths.clone())
    }

    fn save(&mut self, paths: &[String]) -> Result<()> {
        self.paths = merge_paths(&self.paths, paths);
        Ok(())
    }
}
