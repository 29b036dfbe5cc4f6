//! sklog delete - Remove a skill and everything attached to it

use std::io::{BufRead, IsTerminal, Write};

use clap::Args;
use colored::Colorize;

use super::{expect_skill, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::error::{Result, SklogError};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Skill id, id prefix or name
    pub skill: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

pub fn run(ctx: &mut AppContext, args: &DeleteArgs) -> Result<()> {
    let target = resolve_skill(ctx.controller.skills(), &args.skill)?;
    let (id, name) = (target.id.clone(), target.name.clone());

    if !args.yes {
        if ctx.output_format.is_machine() || !std::io::stdin().is_terminal() {
            return Err(SklogError::Cancelled(format!(
                "refusing to delete {name:?} without --yes"
            )));
        }
        if !confirm(&format!("Delete {name:?} and all its records?"))? {
            return Err(SklogError::Cancelled("delete aborted".to_string()));
        }
    }

    let outcome = ctx.controller.dispatch(Action::RemoveSkill(id))?;
    let removed = expect_skill(outcome, &args.skill)?;

    let data = serde_json::json!({ "deleted": removed.id, "name": removed.name });
    if emit_machine(ctx.output_format, &data)? {
        return Ok(());
    }
    println!("{} Deleted {}", "✓".green().bold(), removed.name.bold());
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
