use crate::config::Config;
use crate::db::Store;
use crate::services::ExportJob;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let job = ExportJob::new(store, config.export.clone());
    let summary = job.collect().await?.summary();

    print!("{}", summary.render_markdown());
    Ok(())
}
