use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConviveConfig {
    pub api_port: u16,
    pub paths: ConvivePaths,
}

impl ConviveConfig {
    pub fn from_env() -> Result<Self> {
        let paths = ConvivePaths::discover()?;
        let api_port = env::var("CONVIVE_API_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(3000);
        Ok(Self { api_port, paths })
    }

    pub fn new(api_port: u16, paths: ConvivePaths) -> Self {
        Self { api_port, paths }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConvivePaths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl ConvivePaths {
    pub fn discover() -> Result<Self> {
        let exe_path = std::env::current_exe()
            .map_err(|err| anyhow!("failed to resolve current executable: {err}"))?;
        let base = exe_path
            .parent()
            .ok_or_else(|| anyhow!("executable path missing parent"))?
            .to_path_buf();
        Self::from_base_dir(base)
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let data_dir = base.join("data");
        let db_path = data_dir.join("convive.db");

        Ok(Self {
            base,
            data_dir,
            db_path,
        })
    }
}
