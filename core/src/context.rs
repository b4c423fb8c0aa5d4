use std::sync::Arc;

use crate::config::{AppConfig, LoadedConfig};
use crate::error::CoreError;
use crate::resolver::NameResolver;
use crate::service::{MessageSink, RowSource, Services, ServicesFactory};
use crate::task::RecipientMap;

/// Per-run state handed to every operation: config, recipient resolver and
/// the I/O collaborators. Nothing here is process-global.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    resolver: Arc<NameResolver>,
    services: Services,
}

impl AppContext {
    pub fn new(
        cfg: AppConfig,
        recipients: &RecipientMap,
        services: Services,
    ) -> Result<Self, CoreError> {
        cfg.validate()?;
        Self::assemble(cfg, recipients, services)
    }

    fn assemble(
        cfg: AppConfig,
        recipients: &RecipientMap,
        services: Services,
    ) -> Result<Self, CoreError> {
        let resolver = NameResolver::new(recipients)?;
        if resolver.is_empty() {
            tracing::warn!(target: "taskcast.context", "no recipients configured; every named task renders as a format error");
        }
        Ok(Self {
            cfg,
            resolver: Arc::new(resolver),
            services,
        })
    }

    /// Validate config, load recipients and build services through `factory`.
    pub fn from_loaded(
        loaded: &LoadedConfig,
        factory: &dyn ServicesFactory,
    ) -> Result<Self, CoreError> {
        loaded.cfg.validate()?;
        let recipients = crate::config::load_recipients(loaded)
            .map_err(|e| CoreError::Config(format!("{e:#}")))?;
        let services = factory.build_services(&loaded.cfg)?;
        Self::assemble(loaded.cfg.clone(), &recipients, services)
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn rows(&self) -> &dyn RowSource {
        self.services.rows.as_ref()
    }

    pub fn sink(&self) -> &dyn MessageSink {
        self.services.sink.as_ref()
    }
}
