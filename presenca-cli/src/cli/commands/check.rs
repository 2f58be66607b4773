//! `check` command: verify credentials, sheet access, and column layout.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::api::TokenProvider;
use crate::api::constants::ACCESS_TOKEN_ENV;
use crate::cli::Globals;
use crate::engine::columns::ATTENDANCE_ALIASES;
use crate::engine::{ColumnBinding, GuestField, compute_metrics};

#[derive(Debug, Args)]
pub struct CheckArgs {}

pub async fn run(globals: &Globals, _args: CheckArgs) -> Result<()> {
    let ok = "✓".green();
    let warn = "!".yellow();
    let fail = "✗".red();

    let credentials = globals.credentials_path();
    let env_token = std::env::var(ACCESS_TOKEN_ENV).is_ok_and(|t| !t.trim().is_empty());
    if env_token {
        println!("{ok} using the access token from {ACCESS_TOKEN_ENV}");
    } else if credentials.exists() {
        println!("{ok} credentials file: {}", credentials.display());
    } else {
        println!("{fail} no credentials file at {}", credentials.display());
        println!("  copy an authorized-user JSON there, or export {ACCESS_TOKEN_ENV}");
        anyhow::bail!("credentials missing");
    }

    TokenProvider::from_environment(&credentials)?;
    println!("{ok} credentials parsed");

    let locator = globals.locator()?;
    println!("{ok} sheet locator: {locator}");

    let session = globals.connect().await?;
    let table = session.table();
    println!(
        "{ok} opened '{}' (worksheet '{}')",
        table.spreadsheet_title, table.worksheet_title
    );

    let set = session.fetch().await?;
    println!(
        "{ok} fetched {} guest(s) across {} column(s)",
        set.len(),
        set.columns().len()
    );

    let layout = set.layout();
    for field in GuestField::ALL {
        match layout.binding(field) {
            ColumnBinding::Present { name, index } => {
                println!("{ok} {field}: column '{name}' (#{index})");
            }
            ColumnBinding::Absent => match field {
                GuestField::Name => println!(
                    "{fail} {field}: column '{}' missing; lookups and updates will not work",
                    field.expected_column()
                ),
                GuestField::Attendance => println!(
                    "{warn} {field}: none of {} found",
                    ATTENDANCE_ALIASES.join(", ")
                ),
                _ => println!(
                    "{warn} {field}: column '{}' missing",
                    field.expected_column()
                ),
            },
        }
    }

    let metrics = compute_metrics(&set, &layout);
    println!(
        "{ok} {} total, {} confirmed, {} attended",
        metrics.total, metrics.confirmed, metrics.attended
    );
    Ok(())
}
