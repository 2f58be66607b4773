//! `update` command: edit one guest's phone, RSVP, or attendance.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::cli::Globals;
use crate::engine::{ColumnBinding, FieldUpdate, GuestField};
use crate::errors::SheetError;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Guest name exactly as it appears in the sheet
    pub name: String,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// RSVP answer (sim/não, yes/no)
    #[arg(long, value_parser = parse_yes_no)]
    pub rsvp: Option<bool>,

    /// Attendance check-in (sim/não, yes/no)
    #[arg(long, value_parser = parse_yes_no)]
    pub attended: Option<bool>,

    /// Apply without asking for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(globals: &Globals, args: UpdateArgs) -> Result<()> {
    let mut updates = Vec::new();
    if let Some(phone) = args.phone.clone() {
        updates.push(FieldUpdate::Phone(phone));
    }
    if let Some(rsvp) = args.rsvp {
        updates.push(FieldUpdate::Rsvp(rsvp));
    }
    if let Some(attended) = args.attended {
        updates.push(FieldUpdate::Attendance(attended));
    }
    if updates.is_empty() {
        bail!("nothing to update; pass at least one of --phone, --rsvp, --attended");
    }

    let session = globals.connect().await?;
    let set = session.fetch().await?;
    let layout = set.layout();

    let Some(guest) = set.guest(&layout, &args.name) else {
        bail!(
            "no guest named '{}'; try 'presenca-cli list --search \"{}\"'",
            args.name,
            args.name
        );
    };

    // Preview before touching the sheet.
    println!("{}", args.name.bold());
    for update in &updates {
        let field = update.field();
        match layout.binding(field) {
            ColumnBinding::Present { name, .. } => {
                let current = guest.cell(layout.binding(field)).unwrap_or("");
                println!(
                    "  {}: {} -> {}",
                    name,
                    shown(current).dimmed(),
                    shown(&update.encoded()).green()
                );
            }
            ColumnBinding::Absent => {
                println!(
                    "  {}: {}",
                    field,
                    "no matching column, will be skipped".yellow()
                );
            }
        }
    }

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            bail!("not a terminal; pass --yes to apply without confirmation");
        }
        let proceed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    // Target the live row, not the snapshot's position.
    let row = session.locate(&args.name).await?;

    let report = match session.update(&row, &layout, &updates).await {
        Ok(report) => report,
        Err(SheetError::PartialUpdate {
            row,
            requested,
            written,
            field,
            source,
        }) => {
            for write in &written {
                println!("{} {} = {}", "wrote".green(), write.column, shown(&write.value));
            }
            eprintln!(
                "{} the {} write failed after {} of {} cell(s): {}",
                "error:".red().bold(),
                field,
                written.len(),
                requested,
                source
            );
            bail!("row {row} was left partially updated; fix the cause and re-run");
        }
        Err(other) => return Err(other.into()),
    };

    for write in &report.written {
        println!("{} {} = {}", "wrote".green(), write.column, shown(&write.value));
    }
    for field in &report.skipped_missing_column {
        println!(
            "{} {}: no matching column in the sheet",
            "skipped".yellow(),
            field
        );
    }

    // Re-fetch so the confirmation reflects what the sheet now holds.
    let refreshed = session.fetch().await?;
    let layout = refreshed.layout();
    if let Some(updated) = refreshed.guest(&layout, &args.name) {
        let mut parts = Vec::new();
        for field in GuestField::ALL {
            if let ColumnBinding::Present { name, .. } = layout.binding(field) {
                if let Some(value) = updated.cell(layout.binding(field)) {
                    parts.push(format!("{}: {}", name, shown(value)));
                }
            }
        }
        println!("{} {}", "now".bold(), parts.join(", "));
    }

    Ok(())
}

fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "sim" | "s" | "yes" | "y" | "true" | "1" => Ok(true),
        "nao" | "não" | "n" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("expected sim/não or yes/no, got '{other}'")),
    }
}

fn shown(value: &str) -> &str {
    if value.is_empty() { "(vazio)" } else { value }
}
