//! Show the effective configuration, optionally writing it to disk.

use matchreel_common::config::AppConfig;

pub fn run(write: bool) -> anyhow::Result<()> {
    let config = AppConfig::load();
    println!("{}", serde_json::to_string_pretty(&config)?);

    if write {
        config.save()?;
        eprintln!("Configuration written to the standard location.");
    }

    Ok(())
}
