//! Command-line surface.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

use crate::api::{SheetsClient, TokenProvider};
use crate::config::Config;
use crate::engine::Session;

#[derive(Debug, Parser)]
#[command(
    name = "presenca-cli",
    about = "Guest list and attendance manager for a shared spreadsheet",
    version
)]
pub struct Cli {
    /// Spreadsheet URL or title (defaults to the configured sheet)
    #[arg(long, global = true, value_name = "URL|TITLE")]
    pub sheet: Option<String>,

    /// Credentials file (defaults to the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show attendance totals
    Stats(commands::stats::StatsArgs),
    /// List guests, optionally filtered by name and city
    List(commands::list::ListArgs),
    /// List the distinct cities on the guest list
    Cities(commands::cities::CitiesArgs),
    /// Show one guest in detail
    Show(commands::show::ShowArgs),
    /// Update a guest's phone, RSVP, or attendance
    Update(commands::update::UpdateArgs),
    /// Check credentials, sheet access, and column layout
    Check(commands::check::CheckArgs),
    /// Show or change stored settings
    Config(commands::config::ConfigArgs),
}

/// Global flags merged with the stored configuration.
pub struct Globals {
    sheet: Option<String>,
    credentials: Option<PathBuf>,
    config: Config,
}

impl Globals {
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The sheet to operate on: the --sheet flag, else the configured one.
    pub fn locator(&self) -> Result<String> {
        self.sheet
            .clone()
            .or_else(|| self.config.sheet.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no sheet selected; pass --sheet or store one with \
                     'presenca-cli config set sheet <URL>'"
                )
            })
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.credentials
            .clone()
            .unwrap_or_else(|| self.config.credentials.clone())
    }

    /// Authenticate and open the selected sheet.
    pub async fn connect(&self) -> Result<Session<SheetsClient>> {
        let locator = self.locator()?;
        let tokens = TokenProvider::from_environment(&self.credentials_path())?;
        let client = SheetsClient::new(tokens)?;
        let session = Session::connect(client, &locator).await?;
        Ok(session)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let globals = Globals {
        sheet: cli.sheet,
        credentials: cli.credentials,
        config,
    };

    match cli.command {
        Commands::Stats(args) => commands::stats::run(&globals, args).await,
        Commands::List(args) => commands::list::run(&globals, args).await,
        Commands::Cities(args) => commands::cities::run(&globals, args).await,
        Commands::Show(args) => commands::show::run(&globals, args).await,
        Commands::Update(args) => commands::update::run(&globals, args).await,
        Commands::Check(args) => commands::check::run(&globals, args).await,
        Commands::Config(args) => commands::config::run(&globals, args),
    }
}
