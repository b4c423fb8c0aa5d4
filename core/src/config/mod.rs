mod load;
mod types;

pub use load::{get_taskcast_data_dir, load, load_recipients, LoadedConfig};
pub use types::{
    AppConfig, BoardConfig, ChatConfig, ChatProvider, DeliveryConfig, DiscordServiceConfig,
    FileRowsConfig, Grouping, LoggingConfig, RecipientsConfig, RowsConfig, RowsProvider,
    SheetsServiceConfig,
};
