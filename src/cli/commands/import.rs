//! sklog import - Import skills from a JSON file or a built-in template

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use super::{ensure_category, skill_line};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::{Action, Outcome};
use crate::core::skill::{ImportItem, Skill};
use crate::error::{Result, SklogError};
use crate::templates;
use crate::utils::{pluralize, read_input};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON array of {name, level?, category?, notes?}; `-` reads stdin
    #[arg(required_unless_present = "template", conflicts_with = "template")]
    pub file: Option<PathBuf>,

    /// Built-in template key (see `sklog templates`)
    #[arg(long, short)]
    pub template: Option<String>,
}

#[derive(Serialize)]
struct ImportReport<'a> {
    source: String,
    imported: &'a [Skill],
}

pub fn run(ctx: &mut AppContext, args: &ImportArgs) -> Result<()> {
    let (source, items) = match (&args.template, &args.file) {
        (Some(key), _) => {
            let template = templates::find(key)?;
            (format!("template:{}", template.key), template.import_items())
        }
        (None, Some(path)) => (path.display().to_string(), parse_items(&read_input(path)?)?),
        (None, None) => {
            return Err(SklogError::ValidationFailed(
                "give a file or --template".to_string(),
            ));
        }
    };
    debug!(target: "import", %source, count = items.len(), "importing skills");

    let imported = import_items(ctx, items)?;

    let report = ImportReport {
        source,
        imported: &imported,
    };
    if emit_machine(ctx.output_format, &report)? {
        return Ok(());
    }

    println!(
        "{} Imported {} from {}",
        "✓".green().bold(),
        pluralize(imported.len(), "skill"),
        report.source.cyan()
    );
    for skill in &imported {
        println!("  {}", skill_line(skill));
    }
    Ok(())
}

/// Register the batch's categories, then import every item.
pub fn import_items(ctx: &mut AppContext, items: Vec<ImportItem>) -> Result<Vec<Skill>> {
    let categories: Vec<String> = items
        .iter()
        .filter_map(|item| item.category.clone())
        .unique()
        .collect();
    for category in &categories {
        ensure_category(ctx, category)?;
    }

    match ctx.controller.dispatch(Action::ImportBatch(items))? {
        Outcome::Imported(skills) => Ok(skills),
        _ => Ok(Vec::new()),
    }
}

fn parse_items(raw: &str) -> Result<Vec<ImportItem>> {
    let items: Vec<ImportItem> = serde_json::from_str(raw)
        .map_err(|err| SklogError::Serialization(format!("parse import file: {err}")))?;
    if let Some(position) = items.iter().position(|item| item.name.trim().is_empty()) {
        return Err(SklogError::ValidationFailed(format!(
            "import item #{} has an empty name",
            position + 1
        )));
    }
    Ok(items)
}
