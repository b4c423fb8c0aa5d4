use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::{AppConfig, ChatProvider, RowsProvider};
use crate::task::RecipientMap;

/// Get the default taskcast data directory: ~/.taskcast
pub fn get_taskcast_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".taskcast"))
}

/// A loaded config plus the directory relative paths inside it resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub cfg: AppConfig,
    pub base_dir: PathBuf,
}

impl LoadedConfig {
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}

/// Lookup order: `explicit`, `~/.taskcast/config.toml`, `./config.toml`,
/// built-in defaults. Environment overrides are applied last.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    let home_config = get_taskcast_data_dir()
        .map(|d| d.join("config.toml"))
        .ok();
    let local_config = PathBuf::from("config.toml");

    let chosen = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => home_config
            .filter(|p| p.exists())
            .or_else(|| local_config.exists().then_some(local_config)),
    };

    let (mut cfg, base_dir) = match chosen {
        Some(path) => {
            let s = std::fs::read_to_string(&path)
                .with_context(|| format!("read config {}", path.display()))?;
            let cfg = toml::from_str::<AppConfig>(&s)
                .with_context(|| format!("parse config {}", path.display()))?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (cfg, base)
        }
        None => (AppConfig::default(), PathBuf::from(".")),
    };

    apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
    if let RowsProvider::File(file) = &mut cfg.rows.provider {
        if Path::new(&file.path).is_relative() {
            file.path = base_dir.join(&file.path).to_string_lossy().into_owned();
        }
    }
    Ok(LoadedConfig { cfg, base_dir })
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

pub(crate) fn apply_env_overrides(cfg: &mut AppConfig, get: impl Fn(&str) -> Option<String>) {
    if let RowsProvider::GoogleSheets(ref mut svc) = cfg.rows.provider {
        if let Some(v) = non_empty(get("TASKCAST_SHEETS_API_KEY")) {
            svc.api_key = v;
        }
        if let Some(v) = non_empty(get("TASKCAST_SHEETS_ACCESS_TOKEN")) {
            svc.access_token = v;
        }
    }
    if let ChatProvider::Discord(ref mut svc) = cfg.chat.provider {
        if let Some(v) = non_empty(get("TASKCAST_DISCORD_TOKEN")) {
            svc.token = v;
        }
    }
    if let Some(v) = non_empty(get("TASKCAST_RECIPIENTS_FILE")) {
        cfg.recipients.file = Some(v);
    }
}

/// Merge the recipients file (if any) with inline `[recipients.names]`.
pub fn load_recipients(loaded: &LoadedConfig) -> anyhow::Result<RecipientMap> {
    let mut map = RecipientMap::new();
    if let Some(file) = loaded.cfg.recipients.file.as_deref() {
        let path = loaded.resolve_path(file);
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("read recipients {}", path.display()))?;
        let from_file: RecipientMap = serde_json::from_str(&s)
            .with_context(|| format!("parse recipients {}", path.display()))?;
        map.extend(from_file);
    }
    map.extend(
        loaded
            .cfg
            .recipients
            .names
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    tracing::debug!(target: "taskcast.config", recipients = map.len(), "recipient mapping loaded");
    Ok(map)
}
