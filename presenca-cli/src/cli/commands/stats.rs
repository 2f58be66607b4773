//! `stats` command: attendance totals for the whole list.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::Globals;
use crate::cli::output::OutputFormat;
use crate::engine::compute_metrics;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn run(globals: &Globals, args: StatsArgs) -> Result<()> {
    let session = globals.connect().await?;
    let set = session.fetch().await?;
    let layout = set.layout();
    let metrics = compute_metrics(&set, &layout);

    match args.format {
        OutputFormat::Table => {
            println!(
                "{}",
                session.table().spreadsheet_title.bold().underline()
            );
            println!("Convidados:   {}", metrics.total.to_string().cyan());
            println!("Confirmados:  {}", metrics.confirmed.to_string().green());
            println!("Compareceram: {}", metrics.attended.to_string().yellow());
            for field in layout.missing_fields() {
                println!(
                    "{}",
                    format!("coluna '{}' não existe na planilha", field.expected_column())
                        .yellow()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["metric", "value"])?;
            writer.write_record(["total", &metrics.total.to_string()])?;
            writer.write_record(["confirmed", &metrics.confirmed.to_string()])?;
            writer.write_record(["attended", &metrics.attended.to_string()])?;
            writer.flush()?;
        }
    }
    Ok(())
}
