use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskcast", version, about = "Post spreadsheet task digests to chat channels")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; defaults to ~/.taskcast/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate due dates as of this day (YYYY-MM-DD) instead of the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Print messages to stdout instead of posting them.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SendArgs {
    /// `all`, a board key or an area label.
    pub target: String,

    /// Deliver to this user by direct message instead of the board channel.
    #[arg(long)]
    pub dm: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MineArgs {
    /// Recipient id whose tasks are collected across every board.
    #[arg(long)]
    pub user: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send the digest for a target.
    Send(SendArgs),
    /// Send one recipient their personal digest.
    Mine(MineArgs),
    /// List configured boards and areas.
    List,
}
