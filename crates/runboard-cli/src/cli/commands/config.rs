//! Config command handlers.

use anyhow::Result;
use runboard_core::config::{paths, Config};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = paths::config_path();
    Config::init(&path)?;
    println!("Created config at {}", path.display());
    Ok(())
}
