use super::print_chain;
use crate::cli::FieldArgs;
use crate::config::Config;
use crate::db::{ChainError, Store};
use crate::domain::ChainId;
use crate::models::chain::ChainField;

pub async fn cmd_update_chain(
    config: &Config,
    id: i32,
    fields: &FieldArgs,
    clear: &[ChainField],
) -> anyhow::Result<()> {
    let patch = fields.to_patch(clear);
    let store = Store::from_config(&config.general).await?;

    match store.update_chain(ChainId::new(id), &patch).await {
        Ok(chain) if patch.is_empty() => {
            println!("Nothing to update. Pass --<field> <value> or --clear <field>.");
            print_chain(&chain);
            Ok(())
        }
        Ok(chain) => {
            println!("✓ Updated:");
            print_chain(&chain);
            Ok(())
        }
        Err(ChainError::NotFound(id)) => {
            anyhow::bail!("Chain with ID {id} not found. Use 'animechains list' to see chain IDs.")
        }
        Err(e) => Err(e.into()),
    }
}
