use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use super::row::{SqlValue, ToRow};
use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use crate::schema::TableSchema;
use crate::ui::Ui;

const BATCH_SIZE: usize = 1000;

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    pub fn new(db_path: &Path) -> Result<Self> {
        // Remove existing database if present
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .with_context(|| format!("Failed to remove existing database: {:?}", db_path))?;
        }

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to create database: {:?}", db_path))?;

        // The snapshot may reference ids it does not define; keep those rows
        conn.execute_batch(
            "PRAGMA foreign_keys = OFF;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;

        Ok(Self { conn })
    }

    /// Create all tables for the given schemas
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Insert records into a single table inside one transaction
    pub fn insert_records<T: ToRow>(
        &mut self,
        schema: &TableSchema,
        records: &[T],
        ui: &mut impl Ui,
    ) -> Result<u64> {
        let columns = schema.column_names();
        let insert_sql = generate_insert(schema);
        let total = records.len() as u64;

        let tx = self.conn.transaction()?;
        let mut count: u64 = 0;

        for batch in records.chunks(BATCH_SIZE) {
            insert_batch(&tx, &insert_sql, &columns, batch)
                .with_context(|| format!("Failed to insert into {}", schema.name))?;
            count += batch.len() as u64;
            ui.set_progress(count, total, schema.name);
        }

        tx.commit()?;
        ui.log(format!("{}: {} records", schema.name, count));

        Ok(count)
    }

    /// Optimize and close the database
    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch("PRAGMA optimize;")?;
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")?;
        Ok(())
    }
}

/// Insert a batch of rows into the database
fn insert_batch<T: ToRow>(
    tx: &rusqlite::Transaction,
    sql: &str,
    columns: &[&'static str],
    batch: &[T],
) -> Result<()> {
    let mut stmt = tx.prepare_cached(sql)?;

    for record in batch {
        let row = record.to_row();
        for (idx, col_name) in columns.iter().enumerate() {
            let value = row.values.get(col_name).unwrap_or(&SqlValue::Null);
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;
    }

    Ok(())
}
