use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chunk::DEFAULT_MAX_CHUNK_LEN;
use crate::classify::{CategorySet, ColumnLayout};
use crate::error::CoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub rows: RowsConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub delivery: DeliveryConfig,

    #[serde(default)]
    pub recipients: RecipientsConfig,

    #[serde(default)]
    pub boards: Vec<BoardConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "taskcast_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowsConfig {
    #[serde(default)]
    pub provider: RowsProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum RowsProvider {
    #[serde(rename = "google_sheets")]
    GoogleSheets(SheetsServiceConfig),
    /// JSON file mapping range identifiers to rows.
    #[serde(rename = "file")]
    File(FileRowsConfig),
}

impl Default for RowsProvider {
    fn default() -> Self {
        Self::GoogleSheets(SheetsServiceConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsServiceConfig {
    #[serde(default = "default_sheets_url")]
    pub base_url: String,
    /// API key, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,
    /// OAuth access token; takes precedence over `api_key` when both are set.
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_sheets_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for SheetsServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_sheets_url(),
            api_key: String::new(),
            access_token: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRowsConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub provider: ChatProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum ChatProvider {
    #[serde(rename = "discord")]
    Discord(DiscordServiceConfig),
    #[serde(rename = "stdout")]
    Stdout,
}

impl Default for ChatProvider {
    fn default() -> Self {
        Self::Discord(DiscordServiceConfig::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordServiceConfig {
    #[serde(default = "default_discord_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_discord_url() -> String {
    "https://discord.com/api/v10".to_string()
}

impl Default for DiscordServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_discord_url(),
            token: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,

    /// Print messages instead of sending them.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_max_message_len() -> usize {
    DEFAULT_MAX_CHUNK_LEN
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_message_len: default_max_message_len(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipientsConfig {
    /// JSON object file: display name -> recipient id.
    #[serde(default)]
    pub file: Option<String>,

    /// Inline entries; they win over entries of the same name from `file`.
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Group by area label (`categories` required).
    Category,
    /// Group by assignee set.
    #[default]
    Recipients,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Short name used on the command line.
    pub key: String,
    pub title: String,
    pub sheet_id: String,
    pub range: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    pub columns: ColumnLayout,
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(default)]
    pub categories: Option<CategorySet>,
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.key.trim().is_empty() {
            return Err(CoreError::Config("board with empty key".into()));
        }
        let scope = format!("board `{}`", self.key);
        if self.sheet_id.trim().is_empty() || self.range.trim().is_empty() {
            return Err(CoreError::Config(format!("{scope}: sheet_id and range are required")));
        }
        self.columns.validate().map_err(|e| e.scoped(&scope))?;
        if let Some(set) = &self.categories {
            set.validate().map_err(|e| e.scoped(&scope))?;
        }
        if self.grouping == Grouping::Category && self.categories.is_none() {
            return Err(CoreError::Config(format!(
                "{scope}: grouping = \"category\" needs a categories table"
            )));
        }
        if self.grouping == Grouping::Category && self.columns.category.is_none() {
            tracing::warn!(
                target: "taskcast.config",
                board = %self.key,
                "category grouping without a category column; every task lands in the catch-all"
            );
        }
        Ok(())
    }

    /// The area label of this board matching `name`, if it groups by category.
    pub fn area(&self, name: &str) -> Option<&str> {
        if self.grouping != Grouping::Category {
            return None;
        }
        self.categories.as_ref()?.find(name)
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.delivery.max_message_len == 0 {
            return Err(CoreError::Config("delivery.max_message_len must be positive".into()));
        }
        let mut keys = std::collections::HashSet::new();
        for board in &self.boards {
            board.validate()?;
            if board.key.eq_ignore_ascii_case("all") {
                return Err(CoreError::Config("board key `all` is reserved".into()));
            }
            if !keys.insert(board.key.to_lowercase()) {
                return Err(CoreError::Config(format!("duplicate board key `{}`", board.key)));
            }
        }
        Ok(())
    }

    pub fn board(&self, key: &str) -> Option<&BoardConfig> {
        self.boards.iter().find(|b| b.key.eq_ignore_ascii_case(key.trim()))
    }
}
