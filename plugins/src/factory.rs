use std::sync::Arc;

use anyhow::Result;

use taskcast_core::api::{
    AppConfig, ChatProvider, CoreError, MessageSink, RowSource, RowsProvider, Services,
    ServicesFactory,
};

use crate::chat::{DiscordClient, StdoutSink};
use crate::rows::JsonFileRowSource;
use crate::sheets::SheetsClient;

pub fn build_row_source(cfg: &AppConfig) -> Result<Arc<dyn RowSource>> {
    match &cfg.rows.provider {
        RowsProvider::GoogleSheets(svc_cfg) => Ok(Arc::new(SheetsClient::new(svc_cfg)?)),
        RowsProvider::File(file_cfg) => Ok(Arc::new(JsonFileRowSource::new(&file_cfg.path))),
    }
}

pub fn build_sink(cfg: &AppConfig) -> Result<Arc<dyn MessageSink>> {
    if cfg.delivery.dry_run {
        return Ok(Arc::new(StdoutSink::new()));
    }
    match &cfg.chat.provider {
        ChatProvider::Discord(svc_cfg) => Ok(Arc::new(DiscordClient::new(svc_cfg)?)),
        ChatProvider::Stdout => Ok(Arc::new(StdoutSink::new())),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PluginServicesFactory;

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig) -> Result<Services, CoreError> {
        let rows = build_row_source(cfg).map_err(|e| CoreError::Config(format!("rows: {e:#}")))?;
        let sink = build_sink(cfg).map_err(|e| CoreError::Config(format!("chat: {e:#}")))?;
        tracing::debug!(
            target: "taskcast.plugins",
            rows = rows.name(),
            sink = sink.name(),
            "services built"
        );
        Ok(Services { rows, sink })
    }
}
