//! Optional column declarations
//!
//! Columns added after the first published schema version. Datasets
//! produced before a column existed are still valid input; readers must
//! tolerate its absence.

use crate::db::schema_sync::{ColumnDefinition, SchemaSync, TableSchema};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Sides table: `has_audio` marks sides with a digitized recording
pub struct SidesTableSchema;

impl TableSchema for SidesTableSchema {
    fn table_name() -> &'static str {
        "sides"
    }

    fn optional_columns() -> Vec<ColumnDefinition> {
        vec![ColumnDefinition::new("has_audio", "INTEGER").default("1")]
    }
}

/// Bring all tables up to the current schema version
pub async fn sync_all_table_schemas(pool: &SqlitePool) -> Result<()> {
    let added = SchemaSync::sync_table::<SidesTableSchema>(pool).await?;
    if !added.is_empty() {
        info!("Schema upgraded: {}", added.join(", "));
    }
    Ok(())
}
