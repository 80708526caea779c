//! Validation command handler

use super::load_mapper;
use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use colored::Colorize;
use std::io::Write;
use tracing::{info, instrument};

/// Handle the validate command
#[instrument(skip(out), fields(plan = %args.plan.display()))]
pub fn handle_validate(args: ValidateArgs, out: &mut dyn Write) -> Result<()> {
    let _timer = Timer::new("validate_command");

    let mapper = load_mapper(&args.plan)?;
    info!(entries = mapper.plan().len(), "Plan is valid");

    let target = match mapper.parameters() {
        Some(parameters) => format!("{} ({} parameters)", mapper.target_name(), parameters.len()),
        None => "generic record".to_string(),
    };
    writeln!(
        out,
        "{} {}: {} entries, target {}",
        "✓".green().bold(),
        args.plan.display(),
        mapper.plan().len(),
        target
    )?;

    Ok(())
}
