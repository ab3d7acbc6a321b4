use anyhow::Result;
use colored::Colorize;
use groove_spec::ValidationErrors;
use serde::Serialize;

/// Print every validation error as `[code] at path: message`.
pub(crate) fn print_validation_errors(errors: &ValidationErrors) {
    println!("\n{}", "Errors:".red().bold());
    for error in errors {
        let path_info = if error.path.is_empty() {
            String::new()
        } else {
            format!(" at {}", error.path)
        };
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path_info.dimmed(),
            error.message
        );
    }
}

/// Print a JSON document to stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
