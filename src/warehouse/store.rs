use super::models::TableCounts;
use super::schema::WAREHOUSE_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::VersionedSchema;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::Path;
use tracing::info;

fn current_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

/// The analytical database. Owns the single connection used by a run.
pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Opens an existing, already provisioned database.
    ///
    /// Fails when the file does not exist or its schema does not match the
    /// current table definitions.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database {:?}", db_path))?;

        Self::configure(&conn)?;
        current_schema().validate(&conn).with_context(|| {
            format!(
                "Warehouse database {:?} has no valid schema, run create-tables first",
                db_path
            )
        })?;

        Ok(SqliteWarehouse { conn })
    }

    /// Creates the database file if needed, drops every warehouse table and
    /// creates them anew.
    pub fn provision<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to create warehouse database {:?}", db_path))?;

        Self::configure(&conn)?;
        let mut warehouse = SqliteWarehouse { conn };
        warehouse.reset_schema()?;
        info!("Provisioned warehouse tables in {:?}", db_path);
        Ok(warehouse)
    }

    #[cfg(test)]
    pub(crate) fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        let mut warehouse = SqliteWarehouse { conn };
        warehouse.reset_schema()?;
        Ok(warehouse)
    }

    fn configure(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .context("Failed to enable foreign keys")?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .context("Failed to set journal mode")?;
        Ok(())
    }

    fn reset_schema(&mut self) -> Result<()> {
        let schema = current_schema();
        let tx = self.conn.transaction()?;
        schema.drop_all(&tx).context("Failed to drop warehouse tables")?;
        schema.create(&tx).context("Failed to create warehouse tables")?;
        tx.commit().context("Failed to commit warehouse schema")?;
        Ok(())
    }

    /// Starts the transaction that scopes the work of one source file.
    /// Dropping it without committing rolls the file back.
    pub fn begin_file(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction()
            .context("Failed to begin file transaction")
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
                .with_context(|| format!("Failed to count rows of {}", table))?;
            Ok(n as usize)
        };

        Ok(TableCounts {
            songs: count("songs")?,
            artists: count("artists")?,
            time: count("time")?,
            users: count("users")?,
            songplays: count("songplays")?,
        })
    }
}
