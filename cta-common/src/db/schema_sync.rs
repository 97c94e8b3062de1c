//! Declarative column synchronization
//!
//! Optional columns introduced after the first schema version are declared
//! once in code and appended to existing tables with `ALTER TABLE ADD COLUMN`.
//! The same introspection answers "does this dataset carry column X", which
//! is how older datasets are told apart from newer ones.
//!
//! # Usage
//!
//! ```rust,ignore
//! pub struct SidesTableSchema;
//!
//! impl TableSchema for SidesTableSchema {
//!     fn table_name() -> &'static str { "sides" }
//!
//!     fn optional_columns() -> Vec<ColumnDefinition> {
//!         vec![ColumnDefinition::new("has_audio", "INTEGER").default("1")]
//!     }
//! }
//!
//! SchemaSync::sync_table::<SidesTableSchema>(&pool).await?;
//! ```

use crate::Result;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

/// Column added on top of the base schema
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,
    /// SQL type (e.g., "TEXT", "INTEGER")
    pub sql_type: String,
    /// NOT NULL constraint (only honoured together with a DEFAULT)
    pub not_null: bool,
    /// DEFAULT value, as an SQL literal
    pub default_value: Option<String>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            not_null: false,
            default_value: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Column clause for `ALTER TABLE ... ADD COLUMN`
    fn add_column_clause(&self) -> String {
        let mut clause = format!("{} {}", self.name, self.sql_type);
        match (&self.default_value, self.not_null) {
            (Some(default), true) => clause.push_str(&format!(" NOT NULL DEFAULT {}", default)),
            (Some(default), false) => clause.push_str(&format!(" DEFAULT {}", default)),
            (None, true) => {
                // SQLite refuses NOT NULL without a default on ADD COLUMN
                warn!("Column {} declared NOT NULL without DEFAULT, adding as nullable", self.name);
            }
            (None, false) => {}
        }
        clause
    }
}

/// Declares the optional columns of one table
pub trait TableSchema {
    /// Table name in database
    fn table_name() -> &'static str;

    /// Columns that may be missing from older datasets
    fn optional_columns() -> Vec<ColumnDefinition>;
}

/// Reads the actual schema of a dataset
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    /// Column names of `table_name` in declaration order (PRAGMA table_info)
    pub async fn column_names(pool: &SqlitePool, table_name: &str) -> Result<Vec<String>> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", table_name))
            .fetch_all(pool)
            .await?;

        let mut columns: Vec<(i64, String)> = rows
            .iter()
            .map(|row| (row.get::<i64, _>("cid"), row.get::<String, _>("name")))
            .collect();
        columns.sort_by_key(|(cid, _)| *cid);

        Ok(columns.into_iter().map(|(_, name)| name).collect())
    }

    pub async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
        )
        .bind(table_name)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn has_column(pool: &SqlitePool, table_name: &str, column: &str) -> Result<bool> {
        Ok(Self::column_names(pool, table_name)
            .await?
            .iter()
            .any(|name| name == column))
    }
}

/// Applies declared optional columns to a writable database
pub struct SchemaSync;

impl SchemaSync {
    /// Add every declared column that the table does not have yet
    ///
    /// Returns the names of the columns that were added.
    pub async fn sync_table<T: TableSchema>(pool: &SqlitePool) -> Result<Vec<String>> {
        let table_name = T::table_name();

        if !SchemaIntrospector::table_exists(pool, table_name).await? {
            warn!("Schema sync: table '{}' does not exist, skipping", table_name);
            return Ok(Vec::new());
        }

        let actual = SchemaIntrospector::column_names(pool, table_name).await?;
        let mut added = Vec::new();

        for column in T::optional_columns() {
            if actual.iter().any(|name| *name == column.name) {
                debug!("Schema sync: {}.{} present", table_name, column.name);
                continue;
            }

            let sql = format!(
                "ALTER TABLE {} ADD COLUMN {}",
                table_name,
                column.add_column_clause()
            );
            match sqlx::query(&sql).execute(pool).await {
                Ok(_) => {
                    info!("Schema sync: added column {}.{}", table_name, column.name);
                    added.push(column.name);
                }
                Err(sqlx::Error::Database(db_err))
                    if db_err.message().contains("duplicate column") =>
                {
                    debug!("Schema sync: {}.{} added concurrently", table_name, column.name);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    struct WidgetsSchema;

    impl TableSchema for WidgetsSchema {
        fn table_name() -> &'static str {
            "widgets"
        }

        fn optional_columns() -> Vec<ColumnDefinition> {
            vec![
                ColumnDefinition::new("colour", "TEXT"),
                ColumnDefinition::new("enabled", "INTEGER").not_null().default("1"),
            ]
        }
    }

    async fn setup_test_db() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[test]
    fn test_add_column_clause() {
        let plain = ColumnDefinition::new("colour", "TEXT");
        assert_eq!(plain.add_column_clause(), "colour TEXT");

        let defaulted = ColumnDefinition::new("enabled", "INTEGER").not_null().default("1");
        assert_eq!(defaulted.add_column_clause(), "enabled INTEGER NOT NULL DEFAULT 1");
    }

    #[tokio::test]
    async fn test_sync_adds_missing_columns_once() {
        let pool = setup_test_db().await;
        sqlx::query("CREATE TABLE widgets (id INTEGER PRIMARY KEY, name TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO widgets (name) VALUES ('knob')")
            .execute(&pool)
            .await
            .unwrap();

        let added = SchemaSync::sync_table::<WidgetsSchema>(&pool).await.unwrap();
        assert_eq!(added, vec!["colour".to_string(), "enabled".to_string()]);

        let columns = SchemaIntrospector::column_names(&pool, "widgets").await.unwrap();
        assert_eq!(columns, vec!["id", "name", "colour", "enabled"]);

        // Existing rows pick up the default
        let enabled: i64 = sqlx::query_scalar("SELECT enabled FROM widgets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);

        let again = SchemaSync::sync_table::<WidgetsSchema>(&pool).await.unwrap();
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn test_sync_skips_missing_table() {
        let pool = setup_test_db().await;
        let added = SchemaSync::sync_table::<WidgetsSchema>(&pool).await.unwrap();
        assert!(added.is_empty());
        assert!(!SchemaIntrospector::table_exists(&pool, "widgets").await.unwrap());
    }
}
