use crate::config::Config;

pub async fn cmd_export(config: &Config) -> anyhow::Result<()> {
    crate::export(config).await?;
    Ok(())
}
