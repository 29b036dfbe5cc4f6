//! sklog resource - Attach or detach learning resources

use clap::{Args, Subcommand};
use colored::Colorize;

use super::{expect_skill, resolve_record, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::ResourceKind;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// Attach a resource
    Add {
        /// Skill id, id prefix or name
        skill: String,

        /// Resource title
        title: String,

        /// Resource URL
        url: String,

        /// article, video, course, book, documentation, project or other
        #[arg(long = "type", short = 't', default_value = "article")]
        kind: ResourceKind,
    },

    /// Detach a resource
    Remove {
        /// Skill id, id prefix or name
        skill: String,

        /// Resource position (as shown by `sklog show`), id or id prefix
        resource: String,
    },
}

pub fn run(ctx: &mut AppContext, args: &ResourceArgs) -> Result<()> {
    match &args.command {
        ResourceCommand::Add {
            skill,
            title,
            url,
            kind,
        } => {
            let id = resolve_skill(ctx.controller.skills(), skill)?.id.clone();
            let outcome = ctx.controller.dispatch(Action::AddResource {
                id,
                title: title.clone(),
                url: url.clone(),
                kind: *kind,
            })?;
            let updated = expect_skill(outcome, skill)?;
            if emit_machine(ctx.output_format, &updated)? {
                return Ok(());
            }
            println!(
                "{} Added {} {} to {}",
                "✓".green().bold(),
                kind.icon(),
                title.trim().bold(),
                updated.name.cyan()
            );
        }
        ResourceCommand::Remove { skill, resource } => {
            let target = resolve_skill(ctx.controller.skills(), skill)?;
            let resource_id =
                resolve_record(target.resources.iter().map(|r| &r.id), resource, "resource")?;
            let id = target.id.clone();
            let outcome = ctx
                .controller
                .dispatch(Action::RemoveResource { id, resource_id })?;
            let updated = expect_skill(outcome, skill)?;
            if emit_machine(ctx.output_format, &updated)? {
                return Ok(());
            }
            println!(
                "{} Removed resource from {}",
                "✓".green().bold(),
                updated.name.cyan()
            );
        }
    }
    Ok(())
}
