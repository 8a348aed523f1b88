use crate::core::portfolio::Portfolio;
use crate::core::quote::FundId;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://fintual.cl/api/real_assets";

/// Shape of the funds configuration file: `{"funds_ids": {name: id, ...}}`.
#[derive(Debug, Deserialize)]
struct FundsFile {
    funds_ids: HashMap<String, FundId>,
}

/// Everything an evaluation run needs, assembled from the configuration
/// files up front so the core only ever sees data, never file paths.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub funds: HashMap<String, FundId>,
    pub portfolios: Vec<Portfolio>,
    pub base_url: String,
}

impl AppConfig {
    pub fn load(
        funds_path: Option<&str>,
        portfolios_path: Option<&str>,
        base_url: Option<&str>,
    ) -> Result<Self> {
        let funds_path = match funds_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_dir()?.join("funds.json"),
        };
        let portfolios_path = match portfolios_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_dir()?.join("portfolios.json"),
        };

        let config = AppConfig {
            funds: load_fund_ids(&funds_path)?,
            portfolios: load_portfolios(&portfolios_path)?,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
        };
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn default_config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fpick")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}

/// Reads the fund name to fund id mapping.
pub fn load_fund_ids<P: AsRef<Path>>(path: P) -> Result<HashMap<String, FundId>> {
    let raw = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read funds file: {}", path.as_ref().display()))?;
    let file: FundsFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse funds file: {}", path.as_ref().display()))?;
    Ok(file.funds_ids)
}

/// Reads the candidate portfolio list.
pub fn load_portfolios<P: AsRef<Path>>(path: P) -> Result<Vec<Portfolio>> {
    let raw = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read portfolios file: {}", path.as_ref().display()))?;
    let portfolios: Vec<Portfolio> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse portfolios file: {}", path.as_ref().display()))?;
    Ok(portfolios)
}
