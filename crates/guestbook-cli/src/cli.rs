use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "guestbook",
    about = "Pixel-drawing guestbook: serve the drawing log and moderate it",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file; environment variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List stored drawings with their metadata (oldest first)
    List,
    /// Delete a drawing by storage-order index
    Delete(DeleteArgs),
    /// Show blocked submitter IPs
    Blocked,
    /// Block a submitter IP
    Block(IpArgs),
    /// Lift a block on a submitter IP
    Unblock(IpArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address
    #[arg(long)]
    pub bind: Option<std::net::SocketAddr>,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub index: usize,
    /// Also block the IP the drawing was submitted from
    #[arg(long)]
    pub block: bool,
}

#[derive(Args)]
pub struct IpArgs {
    pub ip: String,
}
