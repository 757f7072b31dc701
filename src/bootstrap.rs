//! One-off setup entry points invoked from the CLI at deployment time.
//!
//! None of these run during request handling.

use anyhow::Result;
use tracing::info;

use crate::constants::seed;
use crate::db::Store;

/// Ensures the schema exists. With `drop`, every table is dropped first.
pub async fn init_database(store: &Store, drop: bool) -> Result<()> {
    if drop {
        store.reset_schema().await?;
    }
    store.ping().await?;
    info!(drop, "Database initialized");
    Ok(())
}

/// Seeds the owner profile name and the demo movie list.
///
/// An existing owner keeps its credentials and only has its display name
/// replaced. Returns the number of movies inserted.
pub async fn forge(store: &Store) -> Result<usize> {
    if store.update_owner_name(seed::OWNER_NAME).await? {
        info!("Owner display name set to {}", seed::OWNER_NAME);
    } else {
        store.create_owner(seed::OWNER_NAME, None, None).await?;
    }

    let inserted = store.insert_movies(seed::MOVIES).await?;
    info!("Seeded {inserted} demo movies");
    Ok(inserted)
}
