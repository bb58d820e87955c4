use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::CardLayout;

pub const DEFAULT_CROSSREF_BASE_URL: &str = "https://api.crossref.org";
pub const DEFAULT_ARXIV_BASE_URL: &str = "https://export.arxiv.org/api/query";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Root application configuration, loaded from `~/.config/researchsnap/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub export: ExportConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Applied to every outgoing request; there are no retries.
    pub timeout_secs: u64,
    /// Added to the User-Agent so registries can reach the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub crossref_base_url: String,
    pub arxiv_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub scale: f32,
    pub default_layout: CardLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notification_secs: u64,
    pub tick_rate_ms: u64,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            contact_email: None,
            crossref_base_url: DEFAULT_CROSSREF_BASE_URL.to_string(),
            arxiv_base_url: DEFAULT_ARXIV_BASE_URL.to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            scale: 2.0,
            default_layout: CardLayout::Horizontal,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: 3,
            tick_rate_ms: 250,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/researchsnap/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("RESEARCHSNAP_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("researchsnap")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.network.timeout_secs == 0 {
            return Err(CoreError::ConfigError(
                "network.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !(self.export.scale.is_finite() && self.export.scale > 0.0) {
            return Err(CoreError::ConfigError(
                "export.scale must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    // ─── Derived values ────────────────────────────────────

    /// Where exported cards land: configured dir, else the user's download
    /// dir, else the working directory.
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Log file used while the TUI owns the terminal.
    pub fn log_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("researchsnap")
            .join("researchsnap.log")
    }

    /// Flat `section.key = value` view used by `config list` / `config get`.
    pub fn key_values(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::new();
        map.insert("network.timeout_secs", self.network.timeout_secs.to_string());
        map.insert(
            "network.contact_email",
            self.network.contact_email.clone().unwrap_or_default(),
        );
        map.insert("network.crossref_base_url", self.network.crossref_base_url.clone());
        map.insert("network.arxiv_base_url", self.network.arxiv_base_url.clone());
        map.insert(
            "export.output_dir",
            self.output_dir().to_string_lossy().to_string(),
        );
        map.insert("export.scale", self.export.scale.to_string());
        map.insert("export.default_layout", self.export.default_layout.to_string());
        map.insert("ui.notification_secs", self.ui.notification_secs.to_string());
        map.insert("ui.tick_rate_ms", self.ui.tick_rate_ms.to_string());
        map
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.key_values()
            .remove(key)
            .ok_or_else(|| CoreError::UnknownConfigKey(key.to_string()))
    }
}
