use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "userdeck", version, about = "TUI for managing user records over a REST backend")]
pub struct Args {
    /// Base URL of the backend API (e.g. "http://localhost:8000")
    #[arg(long, env = "USERDECK_API_URL")]
    pub api_url: Option<String>,

    /// Theme name (e.g. "Catppuccin Mocha")
    #[arg(long)]
    pub theme: Option<String>,
}
