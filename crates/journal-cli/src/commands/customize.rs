//! customize-template command implementation

use colored::Colorize;
use journal_core::{CustomizeOutcome, customize_template};

use crate::context::Context;
use crate::error::Result;

/// Run the customize-template command
///
/// Later updates use the copy under `.ai-instructions/templates/` in place
/// of the bundled template.
pub fn run_customize_template(ctx: &Context, name: &str) -> Result<()> {
    let (_, profile) = ctx.active()?;
    let outcome = customize_template(&profile.root(), &profile.selection(), name)?;

    match &outcome {
        CustomizeOutcome::Created { path, from_live } => {
            let source = if *from_live {
                "your current copy"
            } else {
                "the bundled template"
            };
            println!(
                "{} Created {} from {}",
                "OK".green().bold(),
                path.as_str().cyan(),
                source
            );
            println!("   Edit it, then run {} to apply it.", "journal-kit update".cyan());
        }
        CustomizeOutcome::AlreadyCustomized { path } => {
            println!(
                "{} {} is already customized.",
                "NOTE".blue().bold(),
                path.as_str().cyan()
            );
        }
    }
    Ok(())
}
