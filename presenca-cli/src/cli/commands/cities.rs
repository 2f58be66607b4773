//! `cities` command: distinct city values for filter choices.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::Globals;
use crate::cli::output::OutputFormat;
use crate::engine::distinct_cities;

#[derive(Debug, Args)]
pub struct CitiesArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn run(globals: &Globals, args: CitiesArgs) -> Result<()> {
    let session = globals.connect().await?;
    let set = session.fetch().await?;
    let layout = set.layout();
    let cities = distinct_cities(&set, &layout);

    match args.format {
        OutputFormat::Table => {
            if cities.is_empty() {
                println!("{}", "Nenhuma cidade na planilha.".dimmed());
                return Ok(());
            }
            for city in &cities {
                if city.is_empty() {
                    println!("{}", "(em branco)".dimmed());
                } else {
                    println!("{city}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cities)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["city"])?;
            for city in &cities {
                writer.write_record([city.as_str()])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
