//! `config` command: show or change stored settings.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::cli::Globals;
use crate::config::{Config, config_file};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the stored settings
    Show,
    /// Store a setting (keys: sheet, credentials)
    Set { key: String, value: String },
    /// Reset a setting to its default
    Unset { key: String },
    /// Write a fresh config file with default settings
    Init {
        /// Sheet URL or title to store right away
        #[arg(long, value_name = "URL|TITLE")]
        sheet: Option<String>,
    },
}

pub fn run(globals: &Globals, args: ConfigArgs) -> Result<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = globals.config();
            println!("{}", config_file().display().to_string().dimmed());
            match &config.sheet {
                Some(sheet) => println!("sheet       = {sheet}"),
                None => println!("sheet       = {}", "(unset)".dimmed()),
            }
            println!("credentials = {}", config.credentials.display());
        }
        ConfigAction::Set { key, value } => {
            let mut config = globals.config().clone();
            match key.as_str() {
                "sheet" => config.sheet = Some(value),
                "credentials" => config.credentials = PathBuf::from(value),
                other => bail!("unknown setting '{other}'; known settings: sheet, credentials"),
            }
            config.save()?;
            println!("saved to {}", config_file().display());
        }
        ConfigAction::Unset { key } => {
            let mut config = globals.config().clone();
            match key.as_str() {
                "sheet" => config.sheet = None,
                "credentials" => config.credentials = Config::default().credentials,
                other => bail!("unknown setting '{other}'; known settings: sheet, credentials"),
            }
            config.save()?;
            println!("saved to {}", config_file().display());
        }
        ConfigAction::Init { sheet } => {
            let path = config_file();
            // Existing settings are never overwritten.
            if path.exists() {
                println!("config already exists at {}", path.display());
                println!("use {} to change it", "presenca-cli config set".bold());
                return Ok(());
            }
            let mut config = Config::default();
            config.sheet = sheet;
            config.save()?;
            println!("created {}", path.display());
        }
    }
    Ok(())
}
