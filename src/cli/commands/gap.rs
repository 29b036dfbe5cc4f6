//! sklog gap - Compare a job description against your skills

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::controller::{Action, Outcome};
use crate::core::skill::Skill;
use crate::error::{Result, SklogError};
use crate::gap::GapReport;
use crate::utils::{pluralize, read_input};

#[derive(Args, Debug)]
pub struct GapArgs {
    /// Job description text
    #[arg(long, short, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the job description from a file; `-` reads stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Add every missing skill as a Beginner skill
    #[arg(long)]
    pub add_missing: bool,
}

#[derive(Serialize)]
struct GapOutput {
    #[serde(flatten)]
    report: GapReport,
    added: Vec<Skill>,
}

pub fn run(ctx: &mut AppContext, args: &GapArgs) -> Result<()> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => {
            return Err(SklogError::ValidationFailed(
                "give the job description with --text or --file".to_string(),
            ));
        }
    };

    let report = match ctx.controller.dispatch(Action::AnalyzeGap(text))? {
        Outcome::Gap(report) => report,
        _ => GapReport::default(),
    };
    debug!(
        target: "gap",
        found = report.found.len(),
        missing = report.missing.len(),
        percent = report.match_percent,
        "gap analysis finished"
    );

    let added = if args.add_missing && !report.missing.is_empty() {
        match ctx.controller.dispatch(Action::ImportMissingFromGap)? {
            Outcome::Imported(skills) => skills,
            _ => Vec::new(),
        }
    } else {
        Vec::new()
    };

    let output = GapOutput { report, added };
    if emit_machine(ctx.output_format, &output)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Plain {
        println!("match\t{}", output.report.match_percent);
        for name in &output.report.found {
            println!("found\t{name}");
        }
        for name in &output.report.missing {
            println!("missing\t{name}");
        }
        return Ok(());
    }

    render_human(&output);
    Ok(())
}

fn render_human(output: &GapOutput) {
    let report = &output.report;
    let percent = format!("{}%", report.match_percent);
    let percent = match report.match_percent {
        70..=100 => percent.green(),
        40..=69 => percent.yellow(),
        _ => percent.red(),
    };
    println!("{} {}", "Match:".bold(), percent.bold());

    if report.found.is_empty() && report.missing.is_empty() {
        println!("{}", "No known skills found in the description.".dimmed());
        return;
    }

    if !report.found.is_empty() {
        println!();
        println!("{}", "You have".bold());
        for name in &report.found {
            println!("  {} {name}", "✓".green());
        }
    }
    if !report.missing.is_empty() {
        println!();
        println!("{}", "Missing".bold());
        for name in &report.missing {
            println!("  {} {name}", "✗".red());
        }
    }

    println!();
    if output.added.is_empty() {
        if !report.missing.is_empty() {
            println!(
                "Add them with {}",
                "sklog gap --add-missing ...".bold()
            );
        }
    } else {
        println!(
            "{} Added {} as Beginner",
            "✓".green().bold(),
            pluralize(output.added.len(), "skill")
        );
    }
}
