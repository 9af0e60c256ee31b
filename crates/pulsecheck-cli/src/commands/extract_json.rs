//! Extract-json command implementation.

use crate::cli::ExtractJsonArgs;
use crate::error::Result;
use crate::output::Formatter;
use pulsecheck_extractor::extract_json;
use pulsecheck_synthesizer::parse_report;
use std::fs;

/// Execute the extract-json command.
///
/// Prints the recovered object, then reports whether it is a valid
/// project-health report.
pub fn execute_extract_json(args: ExtractJsonArgs, formatter: &Formatter) -> Result<()> {
    let response = fs::read_to_string(&args.file)?;
    let value = extract_json(&response)?;

    println!("{}", formatter.format_json(&value)?);

    match parse_report(&response) {
        Ok(report) => eprintln!(
            "{}",
            formatter.success(&format!(
                "Valid report: {} (score {})",
                report.project_health, report.score
            ))
        ),
        Err(failure) => eprintln!("{}", formatter.warning(&format!("Not a valid report: {}", failure))),
    }

    Ok(())
}
