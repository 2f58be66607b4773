//! `list` command: filtered guest listing.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::{Map, Value};

use crate::cli::Globals;
use crate::cli::output::{OutputFormat, render_table};
use crate::engine::{
    CityFilter, ColumnBinding, ColumnLayout, GuestField, GuestFilter, GuestRecord, filter_guests,
};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive name fragment to match
    #[arg(long, default_value = "")]
    pub search: String,

    /// Only guests from this exact city; "all" disables the filter
    #[arg(long, default_value = CityFilter::SENTINEL)]
    pub city: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show every sheet column instead of just name and city
    #[arg(long)]
    pub full: bool,
}

pub async fn run(globals: &Globals, args: ListArgs) -> Result<()> {
    let session = globals.connect().await?;
    let set = session.fetch().await?;
    let layout = set.layout();

    let filter = GuestFilter {
        search: args.search,
        city: CityFilter::parse(&args.city),
    };
    let guests = filter_guests(set.records(), &layout, &filter);

    let (headers, rows) = if args.full {
        let headers: Vec<&str> = set.columns().iter().map(String::as_str).collect();
        let rows: Vec<Vec<String>> = guests.iter().map(|g| g.cells().to_vec()).collect();
        (headers, rows)
    } else {
        summary_view(&layout, &guests)
    };

    match args.format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!(
                    "{}",
                    "Nenhum convidado encontrado com os filtros atuais.".dimmed()
                );
                return Ok(());
            }
            print!("{}", render_table(&headers, &rows));
            println!();
            println!("{} guest(s)", rows.len().to_string().bold());
        }
        OutputFormat::Json => {
            let objects: Vec<Value> = rows
                .iter()
                .map(|row| {
                    let mut object = Map::new();
                    for (header, cell) in headers.iter().zip(row) {
                        object.insert((*header).to_string(), Value::String(cell.clone()));
                    }
                    Value::Object(object)
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&Value::Array(objects))?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(&headers)?;
            for row in &rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Headers and rows for the main table: name and city, when bound.
fn summary_view<'a>(
    layout: &'a ColumnLayout,
    guests: &[&GuestRecord],
) -> (Vec<&'a str>, Vec<Vec<String>>) {
    let mut headers = Vec::new();
    let mut bindings = Vec::new();
    for field in [GuestField::Name, GuestField::City] {
        if let ColumnBinding::Present { name, .. } = layout.binding(field) {
            headers.push(name.as_str());
            bindings.push(layout.binding(field));
        }
    }

    let rows = guests
        .iter()
        .map(|guest| {
            bindings
                .iter()
                .map(|binding| guest.cell(binding).unwrap_or("").to_string())
                .collect()
        })
        .collect();
    (headers, rows)
}
