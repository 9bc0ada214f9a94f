use crate::domain::ChainId;
use crate::entities::{chains, prelude::*};
use crate::models::chain::{Chain, ChainField, ChainFilter, ChainPatch, NewChain};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Chain not found: {0}")]
    NotFound(ChainId),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for the `chains` table.
///
/// Every operation runs in its own transaction, committed before returning.
/// An early return drops the transaction, which rolls it back.
pub struct ChainRepository {
    conn: DatabaseConnection,
}

impl ChainRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: chains::Model) -> Chain {
        Chain {
            chain_id: ChainId::new(m.chain_id),
            shikimori_id: m.shikimori_id,
            animego_url: m.animego_url,
            mal_id: m.mal_id,
            kinopoisk_id: m.kinopoisk_id,
            imdb_id: m.imdb_id,
        }
    }

    const fn column(field: ChainField) -> chains::Column {
        match field {
            ChainField::ShikimoriId => chains::Column::ShikimoriId,
            ChainField::AnimegoUrl => chains::Column::AnimegoUrl,
            ChainField::MalId => chains::Column::MalId,
            ChainField::KinopoiskId => chains::Column::KinopoiskId,
            ChainField::ImdbId => chains::Column::ImdbId,
        }
    }

    fn condition(filter: &ChainFilter) -> Condition {
        let mut cond = Condition::all();

        if let Some(id) = filter.chain_id() {
            cond = cond.add(chains::Column::ChainId.eq(id.value()));
        }

        for (field, value) in filter.constraints() {
            let column = Self::column(field);
            cond = match value {
                Some(v) => cond.add(column.eq(v)),
                None => cond.add(column.is_null()),
            };
        }

        cond
    }

    pub async fn add(&self, chain: &NewChain) -> Result<ChainId, ChainError> {
        let active_model = chains::ActiveModel {
            shikimori_id: Set(chain.shikimori_id.clone()),
            animego_url: Set(chain.animego_url.clone()),
            mal_id: Set(chain.mal_id.clone()),
            kinopoisk_id: Set(chain.kinopoisk_id.clone()),
            imdb_id: Set(chain.imdb_id.clone()),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;
        let res = Chains::insert(active_model).exec(&txn).await?;
        txn.commit().await?;

        let id = ChainId::new(res.last_insert_id);
        info!(chain_id = %id, "Added chain");
        Ok(id)
    }

    pub async fn get(&self, filter: &ChainFilter) -> Result<Option<Chain>, ChainError> {
        let txn = self.conn.begin().await?;
        let row = Chains::find()
            .filter(Self::condition(filter))
            .order_by_asc(chains::Column::ChainId)
            .one(&txn)
            .await?;
        txn.commit().await?;

        Ok(row.map(Self::map_model))
    }

    /// All matching chains, oldest first.
    pub async fn get_all(&self, filter: &ChainFilter) -> Result<Vec<Chain>, ChainError> {
        let txn = self.conn.begin().await?;
        let rows = Chains::find()
            .filter(Self::condition(filter))
            .order_by_asc(chains::Column::ChainId)
            .all(&txn)
            .await?;
        txn.commit().await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn count(&self, filter: &ChainFilter) -> Result<u64, ChainError> {
        let txn = self.conn.begin().await?;
        let count = Chains::find()
            .filter(Self::condition(filter))
            .count(&txn)
            .await?;
        txn.commit().await?;

        Ok(count)
    }

    pub async fn update(&self, id: ChainId, patch: &ChainPatch) -> Result<Chain, ChainError> {
        let txn = self.conn.begin().await?;

        let Some(model) = Chains::find_by_id(id.value()).one(&txn).await? else {
            return Err(ChainError::NotFound(id));
        };

        if patch.is_empty() {
            txn.commit().await?;
            return Ok(Self::map_model(model));
        }

        let mut active_model: chains::ActiveModel = model.into();
        for (field, value) in patch.changes() {
            active_model.set(Self::column(field), value.map(str::to_string).into());
        }

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        info!(chain_id = %id, "Updated chain");
        Ok(Self::map_model(updated))
    }
}
