use crate::bootstrap;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_forge(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let inserted = bootstrap::forge(&store).await?;
    let total = store.count_movies().await?;

    println!("✓ Added {inserted} movies ({total} total).");
    Ok(())
}
