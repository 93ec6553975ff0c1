//! Wipe every collection from the record store.

use tracing::info;

use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::store::{Store, collections};

/// Remove all collections.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the store fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = Store::open(&config.data_dir)?;

    for collection in collections::ALL {
        store.clear(collection)?;
        info!(collection, "Cleared collection");
    }

    info!("Record store reset");
    Ok(())
}
