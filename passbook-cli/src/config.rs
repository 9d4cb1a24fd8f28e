use anyhow::{Context, Result};
use passbook_core::StatementConfig;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_passbook_home, passbook_home};

pub fn config_path() -> Result<PathBuf> {
    Ok(passbook_home()?.join("config.toml"))
}

/// Load `path`, or the default config file. A missing default file means built-in defaults;
/// a missing explicit file is an error.
pub fn load_config(path: Option<&Path>) -> Result<StatementConfig> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = config_path()?;
            if !p.exists() {
                log::debug!("no config at {}, using defaults", p.display());
                return Ok(StatementConfig::default());
            }
            p
        }
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn render_config(cfg: &StatementConfig) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

pub fn save_config(cfg: &StatementConfig, path: &Path) -> Result<()> {
    let s = render_config(cfg)?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_passbook_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&StatementConfig::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
