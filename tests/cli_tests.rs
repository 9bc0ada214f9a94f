//! Integration tests for the command handlers.

use animechains::Config;
use animechains::cli::{FieldArgs, FilterArgs, cmd_list_chains, cmd_update_chain};
use animechains::db::Store;
use animechains::models::chain::{ChainField, ChainFilter, NewChain};

fn temp_config() -> Config {
    let db_path =
        std::env::temp_dir().join(format!("animechains-cli-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config
}

async fn seed(config: &Config) -> i32 {
    let store = Store::from_config(&config.general).await.unwrap();
    let id = store
        .add_chain(&NewChain {
            shikimori_id: Some("5".to_string()),
            animego_url: Some("http://a".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    id.value()
}

#[tokio::test]
async fn update_with_empty_patch_fails_for_missing_id() {
    let config = temp_config();
    seed(&config).await;

    let err = cmd_update_chain(&config, 999, &FieldArgs::default(), &[])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("999"));
}

#[tokio::test]
async fn update_with_empty_patch_succeeds_for_existing_id() {
    let config = temp_config();
    let id = seed(&config).await;

    cmd_update_chain(&config, id, &FieldArgs::default(), &[])
        .await
        .unwrap();

    let store = Store::from_config(&config.general).await.unwrap();
    let chain = store
        .get_chain(&ChainFilter::all().id(id.into()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(chain.field(ChainField::AnimegoUrl), Some("http://a"));
}

#[tokio::test]
async fn update_writes_given_fields() {
    let config = temp_config();
    let id = seed(&config).await;

    let fields = FieldArgs {
        kinopoisk_id: Some("9".to_string()),
        ..Default::default()
    };
    cmd_update_chain(&config, id, &fields, &[ChainField::AnimegoUrl])
        .await
        .unwrap();

    let store = Store::from_config(&config.general).await.unwrap();
    let chain = store
        .get_chain(&ChainFilter::all().id(id.into()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(chain.field(ChainField::KinopoiskId), Some("9"));
    assert_eq!(chain.field(ChainField::AnimegoUrl), None);
}

#[tokio::test]
async fn list_accepts_filtered_and_unfiltered_queries() {
    let config = temp_config();
    seed(&config).await;

    cmd_list_chains(&config, &FilterArgs::default()).await.unwrap();

    let filter = FilterArgs {
        null: vec![ChainField::KinopoiskId],
        ..Default::default()
    };
    cmd_list_chains(&config, &filter).await.unwrap();
}
