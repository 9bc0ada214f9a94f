use crate::config::GeneralConfig;
use crate::domain::ChainId;
use crate::models::chain::{Chain, ChainFilter, ChainPatch, NewChain};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::chain::ChainError;

/// File path behind a SQLite URL, or `None` for in-memory databases.
///
/// Accepts `sqlite:path`, `sqlite://path` and a bare path; query parameters
/// such as `?mode=rwc` are not part of the path.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let path = rest.split_once('?').map_or(rest, |(path, _)| path);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

/// Handle to the chains database.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn chain_repo(&self) -> repositories::chain::ChainRepository {
        repositories::chain::ChainRepository::new(self.conn.clone())
    }

    pub async fn add_chain(&self, chain: &NewChain) -> Result<ChainId, ChainError> {
        self.chain_repo().add(chain).await
    }

    pub async fn get_chain(&self, filter: &ChainFilter) -> Result<Option<Chain>, ChainError> {
        self.chain_repo().get(filter).await
    }

    pub async fn get_chains(&self, filter: &ChainFilter) -> Result<Vec<Chain>, ChainError> {
        self.chain_repo().get_all(filter).await
    }

    pub async fn list_all_chains(&self) -> Result<Vec<Chain>, ChainError> {
        self.chain_repo().get_all(&ChainFilter::all()).await
    }

    pub async fn count_chains(&self, filter: &ChainFilter) -> Result<u64, ChainError> {
        self.chain_repo().count(filter).await
    }

    pub async fn update_chain(&self, id: ChainId, patch: &ChainPatch) -> Result<Chain, ChainError> {
        self.chain_repo().update(id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_file_path_strips_scheme() {
        assert_eq!(sqlite_file_path("sqlite:chains.sqlite"), Some("chains.sqlite"));
        assert_eq!(sqlite_file_path("sqlite://data/chains.sqlite"), Some("data/chains.sqlite"));
        assert_eq!(sqlite_file_path("sqlite:///tmp/chains.sqlite"), Some("/tmp/chains.sqlite"));
        assert_eq!(sqlite_file_path("chains.sqlite"), Some("chains.sqlite"));
    }

    #[test]
    fn sqlite_file_path_drops_query() {
        assert_eq!(
            sqlite_file_path("sqlite://chains.sqlite?mode=rwc"),
            Some("chains.sqlite")
        );
        assert_eq!(sqlite_file_path("sqlite:chains.sqlite?mode=ro"), Some("chains.sqlite"));
    }

    #[test]
    fn sqlite_file_path_skips_memory() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("sqlite::memory:?cache=shared"), None);
        assert_eq!(sqlite_file_path("sqlite:"), None);
    }
}
