use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown target `{0}` (expected `all`, a board key or an area)")]
    UnknownTarget(String),
    #[error("fetching rows for board `{board}` failed: {source}")]
    Fetch {
        board: String,
        source: anyhow::Error,
    },
    #[error("delivery to {destination} failed after {sent}/{total} messages: {source}")]
    Delivery {
        destination: String,
        sent: usize,
        total: usize,
        source: anyhow::Error,
    },
    #[error("{failed} of {total} boards failed")]
    Partial { failed: usize, total: usize },
}

impl CoreError {
    /// Prefix a config error message with where it was found.
    pub fn scoped(self, scope: &str) -> Self {
        match self {
            Self::Config(msg) => Self::Config(format!("{scope}: {msg}")),
            other => other,
        }
    }
}
