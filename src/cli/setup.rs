use crate::infra::config::{CONFIG_FILE_NAME, install_default_config};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn install(config_dir: &Path) -> Result<()> {
    info!("Preparing config in {:?}", config_dir);

    if install_default_config(config_dir)? {
        info!(
            "Config ready. Adjust {:?} as needed",
            config_dir.join(CONFIG_FILE_NAME)
        );
    } else {
        info!("{} already present, left untouched", CONFIG_FILE_NAME);
    }

    Ok(())
}
