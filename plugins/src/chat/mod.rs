pub mod discord;
pub mod stdout;

pub use discord::DiscordClient;
pub use stdout::StdoutSink;
