//! Database connection and pool management.

use exn::ResultExt;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Embedded migrations that are run automatically on connect.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
// Every request is a single read; the pool size caps how many run at once.
const MAX_CONNECTIONS: u32 = 8;

/// Connection pool for the content catalog.
///
/// The catalog is written by the content import process and only ever read
/// by lantern, so every connection is interchangeable and requests can run
/// their queries in parallel without coordinating with each other.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(options: SqliteConnectOptions, max: u32) -> Result<SqlitePool> {
        SqlitePoolOptions::new()
            // Query-based PRAGMAs must run on EVERY pooled connection, not
            // just the first one handed out.
            .after_connect(|conn, meta| Box::pin(async move { Self::apply_pragmas(conn, meta).await }))
            .max_connections(max)
            .connect_with(options)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Open the catalog database at the given path, read-only.
    ///
    /// The file and its schema belong to the content import process: a
    /// missing file is an error, and nothing is created or migrated.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = Self::base_options().filename(path.as_ref()).read_only(true);
        let pool = Self::open(options, MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }

    /// Connect to an in-memory database with the schema applied (useful for testing).
    ///
    /// Note:
    /// - In-memory databases are destroyed when the connection closes.
    /// - Do NOT apply `#[cfg(test)]` so that other crates can also use this in their tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = Self::base_options().filename(":memory:");
        // Each in-memory connection is its own database, so the pool must be
        // limited to one connection or seeded data would go missing.
        let db = Self { pool: Self::open(options, 1).await? };
        db.migrate().await?;
        Ok(db)
    }

    /// Base connection options shared between file and in-memory databases.
    ///
    /// The journal mode is left alone; it is the importer's to choose.
    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            // A running import may hold the write lock briefly; wait it out
            // rather than failing the request with SQLITE_BUSY.
            .busy_timeout(Duration::from_millis(1500))
    }

    /// Apply additional PRAGMA settings that aren't exposed via SqliteConnectOptions.
    async fn apply_pragmas(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(
            r#"
                PRAGMA cache_size = -16384;
                PRAGMA temp_store = MEMORY;
                PRAGMA mmap_size = 67108864;
            "#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Run database migrations.
    ///
    /// Only the in-memory catalog is migrated here.
    #[instrument("performing catalog migrations", skip(self))]
    async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.or_raise(|| ErrorKind::Migration)
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    ///
    /// Waits for all connections to be returned to the pool and then closes
    /// them. The Database instance should not be used afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let db = Database::connect_in_memory().await.unwrap();
        assert!(!db.pool().is_closed());
        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.close().await;
    }

    #[tokio::test]
    async fn test_schema_has_catalog_tables() {
        let db = Database::connect_in_memory().await.unwrap();
        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(
            tables,
            vec!["channels", "content_node_files", "content_nodes", "files", "languages", "local_files"]
        );
        db.close().await;
    }

    /// Stand in for the import process: create a catalog file with the schema
    /// and one row in it.
    async fn imported_catalog(path: &Path) {
        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await.unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        sqlx::query("INSERT INTO languages (id, lang_code, readable_name) VALUES ('en', 'en', 'English')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    #[tokio::test]
    async fn test_connect_reads_an_imported_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite3");
        imported_catalog(&path).await;

        let db = Database::connect(&path).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 1);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.sqlite3");
        imported_catalog(&path).await;

        let db = Database::connect(&path).await.unwrap();
        let result = sqlx::query("INSERT INTO languages (id, lang_code, readable_name) VALUES ('fr', 'fr', 'Français')")
            .execute(db.pool())
            .await;
        assert!(result.is_err(), "connection should be read-only");
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_does_not_create_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sqlite3");
        let err = Database::connect(&path).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Database));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_pragmas_are_applied() {
        let db = Database::connect_in_memory().await.unwrap();
        let row: (i64,) = sqlx::query_as("PRAGMA foreign_keys").fetch_one(db.pool()).await.unwrap();
        assert_eq!(row.0, 1, "foreign_keys should be ON");
        let row: (i64,) = sqlx::query_as("PRAGMA cache_size").fetch_one(db.pool()).await.unwrap();
        assert_eq!(row.0, -16384, "cache_size should be set by after_connect()");
        db.close().await;
    }
}
