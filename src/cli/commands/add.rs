//! sklog add - Record a new skill

use clap::Args;
use colored::Colorize;
use tracing::debug;

use super::{ensure_category, expect_skill, level_badge};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::{Level, SkillInput};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Skill name
    pub name: String,

    /// beginner, intermediate or advanced
    #[arg(long, short, default_value = "beginner")]
    pub level: Level,

    /// Category name; unknown names are added to the category list
    #[arg(long, short)]
    pub category: Option<String>,

    /// Free-form notes
    #[arg(long, short)]
    pub notes: Option<String>,
}

pub fn run(ctx: &mut AppContext, args: &AddArgs) -> Result<()> {
    let input = SkillInput {
        name: args.name.clone(),
        level: args.level,
        category: args.category.clone().unwrap_or_default(),
        notes: args.notes.clone().unwrap_or_default(),
    };
    input.validate()?;
    ensure_category(ctx, &input.category)?;

    let outcome = ctx.controller.dispatch(Action::AddSkill(input))?;
    let skill = expect_skill(outcome, &args.name)?;
    debug!(target: "add", id = %skill.id, "skill added");

    if emit_machine(ctx.output_format, &skill)? {
        return Ok(());
    }

    println!(
        "{} Added {} ({})",
        "✓".green().bold(),
        skill.name.bold(),
        level_badge(skill.level)
    );
    println!("  {} {}", "id:".dimmed(), skill.id);
    Ok(())
}
