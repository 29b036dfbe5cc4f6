//! sklog category - List or add categories

use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::controller::{Action, Outcome};
use crate::error::Result;
use crate::views::category_counts;

#[derive(Args, Debug)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: Option<CategoryCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List default and custom categories with skill counts
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    name: &'a str,
    custom: bool,
    skills: usize,
}

pub fn run(ctx: &mut AppContext, args: &CategoryArgs) -> Result<()> {
    match &args.command {
        None | Some(CategoryCommand::List) => list(ctx),
        Some(CategoryCommand::Add { name }) => add(ctx, name),
    }
}

fn list(ctx: &AppContext) -> Result<()> {
    let counts = category_counts(ctx.controller.skills());
    let categories = ctx.controller.categories();
    let entries: Vec<CategoryEntry> = categories
        .all()
        .map(|name| CategoryEntry {
            name,
            custom: categories.custom().iter().any(|c| c == name),
            skills: counts
                .iter()
                .find(|entry| entry.category == name)
                .map_or(0, |entry| entry.count),
        })
        .collect();

    if emit_machine(ctx.output_format, &entries)? {
        return Ok(());
    }
    for entry in &entries {
        if ctx.output_format == OutputFormat::Plain {
            println!("{}\t{}", entry.name, entry.skills);
            continue;
        }
        let tag = if entry.custom { " (custom)" } else { "" };
        println!(
            "{:<20} {}{}",
            entry.name.bold(),
            entry.skills.to_string().cyan(),
            tag.dimmed()
        );
    }
    Ok(())
}

fn add(ctx: &mut AppContext, name: &str) -> Result<()> {
    let outcome = ctx.controller.dispatch(Action::AddCategory(name.to_string()))?;
    let Outcome::CategoryAdded { name, added } = outcome else {
        return Ok(());
    };

    if emit_machine(
        ctx.output_format,
        serde_json::json!({ "name": name, "added": added }),
    )? {
        return Ok(());
    }
    if added {
        println!("{} Added category {}", "✓".green().bold(), name.cyan());
    } else {
        println!("{} Category {} already exists", "!".yellow().bold(), name.cyan());
    }
    Ok(())
}
