use colored::*;

use crate::importer::{ImportSummary, RowOutcome, StepStatus};

pub fn print_banner(title: &str, detail: &str) {
    println!("\n{}", title.bold().blue());
    println!("{}", "═".repeat(60).blue());
    println!("  {}", detail.dimmed());
}

pub fn print_row_outcome(outcome: &RowOutcome) {
    println!(
        "\n{} {} {}",
        "▸".cyan(),
        format!("Row {}", outcome.row.row_number).dimmed(),
        outcome.row.label().bold()
    );

    if let Some(error) = &outcome.error {
        println!("  {} {}", "✗".bright_red(), error);
        return;
    }

    if outcome.steps.is_empty() {
        println!("  {} {}", "-".dimmed(), "No team or group given".dimmed());
        return;
    }

    for step in &outcome.steps {
        match &step.status {
            StepStatus::Added => println!("  {} {}", "✓".bright_green(), step.operation),
            StepStatus::Skipped(reason) => println!(
                "  {} {} ({})",
                "-".yellow(),
                step.operation,
                reason.dimmed()
            ),
            StepStatus::NotFound(reason) | StepStatus::Rejected(reason) => println!(
                "  {} {}: {}",
                "✗".bright_red(),
                step.operation,
                reason
            ),
        }
    }
}

pub fn print_summary(summary: &ImportSummary) {
    println!("\n{}", "Summary".bold().blue());
    println!("{}", "═".repeat(60).blue());
    println!("  Rows processed:    {}", summary.rows());
    println!("  Team calls:        {}", summary.team_calls());
    println!("  Group calls:       {}", summary.group_calls());
    println!("  Memberships added: {}", summary.added().to_string().green());
    println!("  Skipped:           {}", summary.skipped().to_string().yellow());

    let failed = summary.failed_rows();
    if failed.is_empty() {
        println!("\n✅ All rows processed successfully");
        return;
    }

    println!("\n❌ {} rows with errors:", failed.len().to_string().red());
    for outcome in failed {
        for reason in outcome.failure_reasons() {
            println!(
                "  {} {}: {}",
                format!("Row {}", outcome.row.row_number).bright_red(),
                outcome.row.email.as_deref().unwrap_or("<no email>"),
                reason
            );
        }
    }
}
