//! sklog confidence - Rate confidence in a skill

use clap::Args;
use colored::Colorize;

use super::{expect_skill, resolve_skill_id};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::Confidence;
use crate::error::Result;
use crate::utils::stars;

#[derive(Args, Debug)]
pub struct ConfidenceArgs {
    /// Skill id, id prefix or name
    pub skill: String,

    /// Rating from 1 (novice) to 5 (expert)
    pub rating: u8,
}

pub fn run(ctx: &mut AppContext, args: &ConfidenceArgs) -> Result<()> {
    let confidence = Confidence::new(args.rating)?;
    let id = resolve_skill_id(ctx, &args.skill)?;
    let outcome = ctx
        .controller
        .dispatch(Action::SetConfidence { id, confidence })?;
    let skill = expect_skill(outcome, &args.skill)?;

    if emit_machine(ctx.output_format, &skill)? {
        return Ok(());
    }
    println!(
        "{} {} confidence: {} {}",
        "✓".green().bold(),
        skill.name.bold(),
        stars(skill.confidence.get()).yellow(),
        skill.confidence.label().dimmed()
    );
    Ok(())
}
