use super::print_chain;
use crate::cli::FilterArgs;
use crate::config::Config;
use crate::db::Store;
use crate::models::chain::ChainFilter;

pub async fn cmd_list_chains(config: &Config, filter: &FilterArgs) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let filter = filter.to_filter();
    let chains = store.get_chains(&filter).await?;

    if chains.is_empty() {
        println!("No chains found.");
        println!();
        println!("Add one with: animechains add --shikimori-id <id> --animego-url <url>");
        return Ok(());
    }

    if filter.is_empty() {
        println!("Chains ({} total)", chains.len());
    } else {
        let total = store.count_chains(&ChainFilter::all()).await?;
        println!("Chains ({} of {} total)", chains.len(), total);
    }
    println!("{:-<70}", "");

    for chain in &chains {
        print_chain(chain);
    }

    Ok(())
}
