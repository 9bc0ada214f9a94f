use super::print_chain;
use crate::cli::FilterArgs;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_show_chain(config: &Config, filter: &FilterArgs) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;

    match store.get_chain(&filter.to_filter()).await? {
        Some(chain) => print_chain(&chain),
        None => println!("No chain matches the given filter."),
    }

    Ok(())
}
