//! `show` command: one guest in detail.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

use crate::cli::Globals;
use crate::cli::output::OutputFormat;
use crate::engine::{GuestFilter, filter_guests};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Guest name exactly as it appears in the sheet
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn run(globals: &Globals, args: ShowArgs) -> Result<()> {
    let session = globals.connect().await?;
    let set = session.fetch().await?;
    let layout = set.layout();

    let guest = match set.guest(&layout, &args.name) {
        Some(guest) => guest,
        None => {
            // Suggest near matches before giving up; lookups here are
            // exact because updates are.
            let filter = GuestFilter {
                search: args.name.clone(),
                ..Default::default()
            };
            let near: Vec<&str> = filter_guests(set.records(), &layout, &filter)
                .into_iter()
                .filter_map(|g| g.cell(&layout.name))
                .take(5)
                .collect();
            if near.is_empty() {
                bail!("no guest named '{}'", args.name);
            }
            eprintln!("No exact match for '{}'. Closest names:", args.name);
            for name in near {
                eprintln!("  {name}");
            }
            bail!("guest names must match exactly; pick one from the list above");
        }
    };

    match args.format {
        OutputFormat::Table => {
            let label_width = set.columns().iter().map(|c| c.width()).max().unwrap_or(0);
            for (column, cell) in set.columns().iter().zip(guest.cells()) {
                let pad = " ".repeat(label_width - column.width());
                println!("{}{}  {}", column.bold(), pad, cell);
            }
        }
        OutputFormat::Json => {
            let mut object = Map::new();
            for (column, cell) in set.columns().iter().zip(guest.cells()) {
                object.insert(column.clone(), Value::String(cell.clone()));
            }
            println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["field", "value"])?;
            for (column, cell) in set.columns().iter().zip(guest.cells()) {
                writer.write_record([column.as_str(), cell.as_str()])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
