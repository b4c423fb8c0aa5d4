//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskcast_core::api` instead of reaching into internal modules.

pub use crate::chunk::{chunk_lines, DEFAULT_MAX_CHUNK_LEN};
pub use crate::classify::{classify_row, classify_rows, CategorySet, ColumnLayout, RowContext};
pub use crate::config::{
    load, load_recipients, AppConfig, BoardConfig, ChatProvider, DiscordServiceConfig,
    FileRowsConfig, Grouping, LoadedConfig, LoggingConfig, RowsProvider, SheetsServiceConfig,
};
pub use crate::context::AppContext;
pub use crate::digest::{area_digest, category_digest, personal_digest, recipient_digest, Mention};
pub use crate::engine::{send_personal, send_target, Outcome, OutcomeKind, SendReport};
pub use crate::error::{CliError, CoreError};
pub use crate::resolver::NameResolver;
pub use crate::service::{Destination, MessageSink, RowSource, Services, ServicesFactory};
pub use crate::task::{Bucket, Buckets, RecipientMap, Task, TaskStatus};
