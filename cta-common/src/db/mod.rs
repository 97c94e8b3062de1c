//! Relational dataset: schema, handle, row models and authoring

pub mod builder;
pub mod dataset;
pub mod models;
pub mod schema;
pub mod schema_sync;
pub mod table_schemas;

pub use builder::DatasetBuilder;
pub use dataset::{Dataset, SideQueryVariant};
pub use models::*;
pub use schema::create_schema;
pub use schema_sync::{ColumnDefinition, SchemaIntrospector, SchemaSync, TableSchema};
pub use table_schemas::{sync_all_table_schemas, SidesTableSchema};
