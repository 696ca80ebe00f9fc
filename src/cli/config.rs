//! Show the effective configuration.

use super::Settings;
use crate::error::Error;

/// Print the merged config as TOML.
pub fn show(settings: &Settings) -> Result<(), Error> {
    let (config, _) = settings.load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
