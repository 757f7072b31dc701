use crate::bootstrap;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_initdb(config: &Config, drop: bool) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    bootstrap::init_database(&store, drop).await?;

    if drop {
        println!("✓ Dropped and re-created all tables.");
    }
    println!("✓ Initialized database.");
    Ok(())
}
