use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::CoreError;

/// Where a message goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Channel(String),
    DirectMessage(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "channel {id}"),
            Self::DirectMessage(id) => write!(f, "user {id}"),
        }
    }
}

/// Reads rows of cell strings for a sheet range.
#[async_trait]
pub trait RowSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_rows(&self, sheet_id: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>>;
}

/// Delivers one already-chunked message.
#[async_trait]
pub trait MessageSink: Send + Sync {
    fn name(&self) -> &str;
    async fn send(&self, destination: &Destination, content: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Services {
    pub rows: Arc<dyn RowSource>,
    pub sink: Arc<dyn MessageSink>,
}

pub trait ServicesFactory: Send + Sync {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, CoreError>;
}
