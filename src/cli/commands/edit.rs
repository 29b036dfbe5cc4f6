//! sklog edit - Change a skill's editable fields
//!
//! Fields not given on the command line keep their current values.

use clap::Args;
use colored::Colorize;
use tracing::debug;

use super::{ensure_category, expect_skill, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::{Level, SkillInput};
use crate::error::{Result, SklogError};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Skill id, id prefix or name
    pub skill: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New level
    #[arg(long, short)]
    pub level: Option<Level>,

    /// New category (empty string clears it)
    #[arg(long, short)]
    pub category: Option<String>,

    /// New notes (empty string clears them)
    #[arg(long, short)]
    pub notes: Option<String>,
}

pub fn run(ctx: &mut AppContext, args: &EditArgs) -> Result<()> {
    if args.name.is_none() && args.level.is_none() && args.category.is_none() && args.notes.is_none()
    {
        return Err(SklogError::ValidationFailed(
            "nothing to change; pass --name, --level, --category or --notes".to_string(),
        ));
    }

    let current = resolve_skill(ctx.controller.skills(), &args.skill)?;
    let id = current.id.clone();
    let fields = SkillInput {
        name: args.name.clone().unwrap_or_else(|| current.name.clone()),
        level: args.level.unwrap_or(current.level),
        category: args
            .category
            .clone()
            .unwrap_or_else(|| current.category.clone()),
        notes: args.notes.clone().unwrap_or_else(|| current.notes.clone()),
    };
    fields.validate()?;
    ensure_category(ctx, &fields.category)?;

    ctx.controller.dispatch(Action::StartEdit(id))?;
    let outcome = ctx.controller.dispatch(Action::SaveEdit(fields))?;
    let skill = expect_skill(outcome, &args.skill)?;
    debug!(target: "edit", id = %skill.id, "skill edited");

    if emit_machine(ctx.output_format, &skill)? {
        return Ok(());
    }
    println!("{} Updated {}", "✓".green().bold(), skill.name.bold());
    Ok(())
}
