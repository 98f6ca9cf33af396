use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Terminal dashboard for annotation upload tasks and abstract lookup.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "annodash", version)]
pub struct Args {
    /// RON configuration file; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:5000/
    #[arg(long)]
    pub base_url: Option<String>,

    /// Offer the delete control on finished tasks.
    #[arg(long)]
    pub enable_delete: bool,

    /// Rows per table page.
    #[arg(long)]
    pub page_length: Option<usize>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace.
    #[arg(long)]
    pub log_level: Option<String>,
}
