//! sklog journal - Write or remove journal entries

use clap::{Args, Subcommand};
use colored::Colorize;

use super::{expect_skill, resolve_record, resolve_skill};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct JournalArgs {
    #[command(subcommand)]
    pub command: JournalCommand,
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Write an entry dated now
    Add {
        /// Skill id, id prefix or name
        skill: String,

        /// What you learned
        text: String,
    },

    /// Remove an entry
    Remove {
        /// Skill id, id prefix or name
        skill: String,

        /// Entry position (as shown by `sklog show`), id or id prefix
        entry: String,
    },
}

pub fn run(ctx: &mut AppContext, args: &JournalArgs) -> Result<()> {
    let (skill_ref, outcome) = match &args.command {
        JournalCommand::Add { skill, text } => {
            let id = resolve_skill(ctx.controller.skills(), skill)?.id.clone();
            let outcome = ctx.controller.dispatch(Action::AddJournalEntry {
                id,
                text: text.clone(),
            })?;
            (skill, outcome)
        }
        JournalCommand::Remove { skill, entry } => {
            let target = resolve_skill(ctx.controller.skills(), skill)?;
            let entry_id = resolve_record(target.journal.iter().map(|e| &e.id), entry, "entry")?;
            let id = target.id.clone();
            let outcome = ctx
                .controller
                .dispatch(Action::RemoveJournalEntry { id, entry_id })?;
            (skill, outcome)
        }
    };

    let updated = expect_skill(outcome, skill_ref)?;
    if emit_machine(ctx.output_format, &updated)? {
        return Ok(());
    }
    let verb = match args.command {
        JournalCommand::Add { .. } => "Added journal entry to",
        JournalCommand::Remove { .. } => "Removed journal entry from",
    };
    println!(
        "{} {verb} {} ({} entries)",
        "✓".green().bold(),
        updated.name.cyan(),
        updated.journal.len()
    );
    Ok(())
}
