//! sklog list - List skills with level, search and sort filters

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use super::{level_badge, short_id};
use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json_line, emit_machine};
use crate::core::controller::Action;
use crate::core::skill::{Level, Skill};
use crate::error::Result;
use crate::utils::{format_minutes, pluralize, stars, truncate_string};
use crate::views::{LevelCounts, Query, SortKey};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only skills at this level
    #[arg(long, short)]
    pub level: Option<Level>,

    /// Case-insensitive substring of the name
    #[arg(long, short)]
    pub search: Option<String>,

    /// newest, oldest, name-asc, name-desc or level (default from config)
    #[arg(long)]
    pub sort: Option<SortKey>,
}

/// Serializable skill entry for JSON/JSONL output
#[derive(Debug, Clone, Serialize)]
struct SkillEntry<'a> {
    id: &'a str,
    name: &'a str,
    level: Level,
    category: &'a str,
    confidence: u8,
    practice_minutes: u32,
    created_at: String,
}

impl<'a> From<&'a Skill> for SkillEntry<'a> {
    fn from(s: &'a Skill) -> Self {
        Self {
            id: s.id.as_str(),
            name: &s.name,
            level: s.level,
            category: &s.category,
            confidence: s.confidence.get(),
            practice_minutes: s.practice_time,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

pub fn run(ctx: &mut AppContext, args: &ListArgs) -> Result<()> {
    let query = Query {
        level: args.level,
        search: args.search.clone().unwrap_or_default(),
        sort: args.sort.unwrap_or(ctx.config.display.default_sort),
    };
    debug!(target: "list", ?query, mode = ?ctx.output_format, "listing skills");
    ctx.controller.dispatch(Action::SetQuery(query))?;

    let skills = ctx.controller.visible();
    let counts = LevelCounts::from_skills(ctx.controller.skills());

    match ctx.output_format {
        OutputFormat::Json => {
            let entries: Vec<SkillEntry> = skills.iter().map(|s| SkillEntry::from(*s)).collect();
            emit_machine(
                OutputFormat::Json,
                serde_json::json!({
                    "count": entries.len(),
                    "total": counts.total,
                    "skills": entries,
                }),
            )?;
        }
        OutputFormat::Jsonl => {
            for skill in &skills {
                emit_json_line(&SkillEntry::from(*skill))?;
            }
        }
        OutputFormat::Plain => {
            for skill in &skills {
                println!(
                    "{}\t{}\t{}\t{}",
                    skill.id, skill.name, skill.level, skill.category
                );
            }
        }
        OutputFormat::Human => display_human(&skills, &counts),
    }
    Ok(())
}

fn display_human(skills: &[&Skill], counts: &LevelCounts) {
    if counts.total == 0 {
        println!("No skills yet");
        println!();
        println!("Add one with: sklog add <name>");
        return;
    }
    if skills.is_empty() {
        println!("No skills match the current filters");
        return;
    }

    println!(
        "{:8}  {:28} {:14} {:14} {:7} {}",
        "ID", "NAME", "LEVEL", "CATEGORY", "CONF", "PRACTICE"
    );
    println!("{}", "─".repeat(84));

    for skill in skills {
        let practice = if skill.practice_time == 0 {
            "-".to_string()
        } else {
            format_minutes(u64::from(skill.practice_time))
        };
        println!(
            "{:8}  {:28} {:14} {:14} {:7} {}",
            short_id(skill.id.as_str()).dimmed(),
            truncate_string(&skill.name, 28),
            level_badge(skill.level),
            truncate_string(&skill.category, 14).cyan(),
            stars(skill.confidence.get()),
            practice
        );
    }
    println!();
    println!(
        "{} shown of {}",
        pluralize(skills.len(), "skill"),
        counts.total
    );
}
