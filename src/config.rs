use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::cli::FetchArgs;

pub const DEFAULT_URL: &str = "https://bing.img.run/uhd.php";

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_retries() -> u32 {
    3
}

fn default_timeout_secs() -> u64 {
    15
}

/// Filename policy for saved wallpapers
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// One file per calendar day
    #[default]
    Daily,
    /// One timestamped file per run
    Unique,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub naming: Naming,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_true")]
    pub verify_certificates: bool,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub log_to_file: bool,
    #[serde(default = "default_true")]
    pub set_wallpaper: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            data_dir: None,
            naming: Naming::default(),
            overwrite: false,
            verify_certificates: true,
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
            log_to_file: true,
            set_wallpaper: true,
        }
    }
}

impl Config {
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Unable to determine user config directory")?;
        Ok(config_dir.join("bingwall").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let cfg_path = Self::config_file_path()?;
        if !cfg_path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        toml::from_str(&s).context("parsing config toml")
    }

    pub fn save(&self) -> Result<()> {
        let cfg_path = Self::config_file_path()?;
        if let Some(parent) = cfg_path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(&cfg_path, toml).context("writing config file")?;
        Ok(())
    }

    /// Base directory holding `images/` and `logs/`
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .context("Unable to determine user data directory")?
                .join("bingwall")),
        }
    }

    pub fn images_dir(&self) -> Result<PathBuf> {
        Ok(self.base_dir()?.join("images"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.base_dir()?.join("logs"))
    }

    /// Command-line flags win over the config file
    pub fn with_overrides(mut self, args: &FetchArgs) -> Self {
        if let Some(url) = &args.url {
            self.url = url.clone();
        }
        if let Some(dir) = &args.dir {
            self.data_dir = Some(dir.clone());
        }
        if args.daily {
            self.naming = Naming::Daily;
        }
        if args.unique {
            self.naming = Naming::Unique;
        }
        if args.overwrite {
            self.overwrite = true;
        }
        if args.insecure {
            self.verify_certificates = false;
        }
        if let Some(retries) = args.retries {
            self.max_retries = retries;
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if args.no_set {
            self.set_wallpaper = false;
        }
        self
    }
}
