use clap::Parser;

/// Skylight — a minimal webview shell.
#[derive(Parser, Debug)]
#[command(name = "skylight", version, about)]
pub struct Args {
    /// URL to open instead of the configured homepage.
    pub url: Option<String>,

    /// Window title override.
    #[arg(long)]
    pub title: Option<String>,

    /// Window width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Open the developer inspector at startup.
    #[arg(long)]
    pub inspector: bool,

    /// JavaScript to evaluate once the document has loaded.
    #[arg(long)]
    pub eval: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
