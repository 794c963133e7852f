use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::core::history::DEFAULT_HISTORY_LIMIT;
use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".spendbook";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "transactions.json";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory: `$SPENDBOOK_HOME` or `~/.spendbook`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SPENDBOOK_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transaction file loaded at startup and used by a bare `save`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Undo depth; `0` keeps every command.
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = base.join(CONFIG_FILE);
        Self { base, path }
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured data file, or `transactions.json` beside the config.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        config
            .data_file
            .clone()
            .unwrap_or_else(|| self.base.join(DATA_FILE))
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
