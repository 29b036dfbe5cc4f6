//! sklog templates - List built-in skill templates

use clap::Args;
use colored::Colorize;

use super::level_badge;
use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::error::Result;
use crate::templates::TEMPLATES;
use crate::utils::pluralize;

#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Also list each template's skills
    #[arg(long)]
    pub skills: bool,
}

pub fn run(ctx: &mut AppContext, args: &TemplatesArgs) -> Result<()> {
    if emit_machine(ctx.output_format, &TEMPLATES)? {
        return Ok(());
    }

    for template in &TEMPLATES {
        if ctx.output_format == OutputFormat::Plain {
            println!("{}\t{}\t{}", template.key, template.name, template.skills.len());
            continue;
        }
        println!(
            "{:<10} {} ({})",
            template.key.cyan().bold(),
            template.name,
            pluralize(template.skills.len(), "skill").dimmed()
        );
        if args.skills {
            for skill in template.skills {
                println!(
                    "    {:<24} {:<14} {}",
                    skill.name,
                    level_badge(skill.level),
                    skill.category.dimmed()
                );
            }
        }
    }
    if ctx.is_human() {
        println!();
        println!("Import one with {}", "sklog import --template <key>".bold());
    }
    Ok(())
}
