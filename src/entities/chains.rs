use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chains")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub chain_id: i32,
    pub shikimori_id: Option<String>,
    pub animego_url: Option<String>,
    pub mal_id: Option<String>,
    pub kinopoisk_id: Option<String>,
    pub imdb_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
