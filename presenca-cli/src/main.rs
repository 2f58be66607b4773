use clap::Parser;
use colored::Colorize;
use is_terminal::IsTerminal;

mod api;
mod cli;
mod config;
mod engine;
mod errors;

use cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Piped output gets no ANSI codes.
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli).await {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
