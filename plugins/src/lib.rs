pub mod chat;
pub mod factory;
pub mod http;
pub mod rows;
pub mod sheets;

pub use factory::PluginServicesFactory;
