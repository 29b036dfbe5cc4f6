//! sklog promote - Move a skill up one level

use clap::Args;
use colored::Colorize;

use super::{expect_skill, level_badge, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::Level;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct PromoteArgs {
    /// Skill id, id prefix or name
    pub skill: String,
}

pub fn run(ctx: &mut AppContext, args: &PromoteArgs) -> Result<()> {
    let current = resolve_skill(ctx.controller.skills(), &args.skill)?;
    let (id, before) = (current.id.clone(), current.level);

    let outcome = ctx.controller.dispatch(Action::Promote(id))?;
    let skill = expect_skill(outcome, &args.skill)?;

    let data = serde_json::json!({
        "skill": skill,
        "previous_level": before,
        "promoted": before != skill.level,
    });
    if emit_machine(ctx.output_format, &data)? {
        return Ok(());
    }

    if before == skill.level {
        println!(
            "{} {} is already {}",
            "!".yellow(),
            skill.name.bold(),
            level_badge(Level::Advanced)
        );
    } else {
        println!(
            "{} {}: {} → {}",
            "✓".green().bold(),
            skill.name.bold(),
            level_badge(before),
            level_badge(skill.level)
        );
    }
    Ok(())
}
