use anyhow::Result;
use colored::*;
use phenotypes_core::{ReportStatus, ValidationReport};
use phenotypes_ingest::{ImportSummary, StoreStats};
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", report.to_json_pretty()?),
        _ => print_text_report(report),
    }
    Ok(())
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    println!();
    for entry in report.entries() {
        let marker = match entry.status {
            ReportStatus::Pass => "✓".green().bold(),
            ReportStatus::Fail => "✗".red().bold(),
            ReportStatus::Todo => "•".yellow().bold(),
        };
        println!("  {} [{}] {}", marker, entry.status, entry.title);
        if entry.status == ReportStatus::Fail {
            println!("      {}", entry.details.red());
        }
    }

    let count = |status: ReportStatus| {
        report
            .entries()
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    };
    println!("\n{}", "Summary:".bold());
    println!("  Passed:  {}", count(ReportStatus::Pass));
    println!("  Failed:  {}", count(ReportStatus::Fail));
    println!("  Not run: {}", count(ReportStatus::Todo));
    println!("{}", "═".repeat(60));
}

pub fn print_import_summary(summary: &ImportSummary, stats: &StoreStats, format: &str) -> Result<()> {
    if format == "json" {
        let output = json!({
            "summary": summary,
            "store": stats,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_success(&format!(
        "Imported {} traits for genus {}",
        summary.rows, summary.genus
    ));
    for (index, ids) in summary.traits.iter().enumerate() {
        println!(
            "  {:>3}. trait {}  method {}  unit {}",
            index + 1,
            ids.trait_id,
            ids.method_id,
            ids.unit_id
        );
    }
    println!("\nStore now holds:");
    println!("  Terms:         {}", stats.terms);
    println!("  Relationships: {}", stats.relationships);
    println!("  Properties:    {}", stats.properties);
    println!("  Completed at:  {}", summary.completed_at.to_rfc3339());
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
