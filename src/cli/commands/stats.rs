//! sklog stats - Counts, categories, recent activity and streak

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::level_badge;
use crate::app::AppContext;
use crate::challenges::ChallengeBoard;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_machine};
use crate::error::Result;
use crate::utils::{format_minutes, pluralize};
use crate::views::{
    DecayLevel, DecayWarning, Summary, TimelineEntry, decay_warning, recent,
};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Number of recent skills to show (default from config)
    #[arg(long)]
    pub recent: Option<usize>,
}

#[derive(Serialize)]
struct NeedsPractice {
    name: String,
    #[serde(flatten)]
    warning: DecayWarning,
}

#[derive(Serialize)]
struct StatsReport {
    #[serde(flatten)]
    summary: Summary,
    streak: u32,
    points: u64,
    recent: Vec<TimelineEntry>,
    needs_practice: Vec<NeedsPractice>,
}

pub fn run(ctx: &mut AppContext, args: &StatsArgs) -> Result<()> {
    let store = ctx.controller.store();
    let now = store.now();
    let today = store.clock().today();
    let skills = ctx.controller.skills();

    let mut needs_practice: Vec<NeedsPractice> = skills
        .iter()
        .filter_map(|skill| {
            decay_warning(skill, now, &ctx.config.decay).map(|warning| NeedsPractice {
                name: skill.name.clone(),
                warning,
            })
        })
        .collect();
    needs_practice.sort_by(|a, b| b.warning.days_since.cmp(&a.warning.days_since));

    let report = StatsReport {
        summary: Summary::from_skills(skills),
        streak: ctx.controller.streak().current(today),
        points: ChallengeBoard::load(store.kv()).points,
        recent: recent(
            skills,
            now,
            args.recent.unwrap_or(ctx.config.display.timeline_limit),
        ),
        needs_practice,
    };

    if emit_machine(ctx.output_format, &report)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Plain {
        let levels = &report.summary.levels;
        println!("total\t{}", levels.total);
        println!("beginner\t{}", levels.beginner);
        println!("intermediate\t{}", levels.intermediate);
        println!("advanced\t{}", levels.advanced);
        println!("practice_minutes\t{}", report.summary.practice_minutes);
        println!("streak\t{}", report.streak);
        println!("points\t{}", report.points);
        return Ok(());
    }

    emit_human(render(&report));
    Ok(())
}

fn render(report: &StatsReport) -> HumanLayout {
    let summary = &report.summary;
    let mut layout = HumanLayout::new();
    layout.title("Skill stats");
    layout
        .kv("Skills", &summary.levels.total.to_string())
        .kv("Beginner", &summary.levels.beginner.to_string())
        .kv("Intermediate", &summary.levels.intermediate.to_string())
        .kv("Advanced", &summary.levels.advanced.to_string())
        .kv("Practice", &format_minutes(summary.practice_minutes))
        .kv("Streak", &format!("🔥 {}", pluralize(report.streak as usize, "day")))
        .kv("Points", &report.points.to_string())
        .kv(
            "Records",
            &format!(
                "{}, {}, {}",
                pluralize(summary.resources, "resource"),
                pluralize(summary.journal_entries, "journal note"),
                pluralize(summary.certificates, "certificate")
            ),
        );

    if !summary.categories.is_empty() {
        layout.blank().section("Categories");
        for entry in &summary.categories {
            layout.bullet(&format!("{} ({})", entry.category, entry.count));
        }
    }

    if !report.recent.is_empty() {
        layout.blank().section("Recently added");
        for entry in &report.recent {
            layout.bullet(&format!(
                "{} {} {}",
                entry.name.bold(),
                level_badge(entry.level),
                entry.label.dimmed()
            ));
        }
    }

    if !report.needs_practice.is_empty() {
        layout.blank().section("Needs practice");
        for item in &report.needs_practice {
            let marker = match item.warning.level {
                DecayLevel::Critical => "!".red().bold(),
                DecayLevel::High => "!".yellow().bold(),
                DecayLevel::Medium => "!".normal(),
            };
            layout.bullet(&format!("{marker} {}: {}", item.name, item.warning.message));
        }
    }
    layout
}
