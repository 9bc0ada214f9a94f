use crate::cli::FieldArgs;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_add_chain(config: &Config, fields: &FieldArgs) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let id = store.add_chain(&fields.to_new_chain()).await?;

    println!("✓ Added chain (ID: {id})");
    Ok(())
}
