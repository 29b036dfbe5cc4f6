//! sklog practice - Log practice minutes or run a focus timer

use std::thread;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use super::{expect_skill, resolve_skill_id};
use crate::app::AppContext;
use crate::cli::output::emit_machine;
use crate::core::controller::Action;
use crate::core::skill::{Skill, SkillId};
use crate::error::{Result, SklogError};
use crate::timer::{Phase, PracticeTimer, format_clock};
use crate::utils::format_minutes;

#[derive(Args, Debug)]
pub struct PracticeArgs {
    /// Skill id, id prefix or name
    pub skill: String,

    /// Log this many minutes without running the timer
    #[arg(long, short)]
    pub minutes: Option<u32>,

    /// Focus sessions to run, with breaks in between
    #[arg(long, short, default_value_t = 1, conflicts_with = "minutes")]
    pub sessions: u32,
}

#[derive(Serialize)]
struct PracticeReport {
    skill: Skill,
    logged_minutes: u32,
    focus_sessions: u32,
}

pub fn run(ctx: &mut AppContext, args: &PracticeArgs) -> Result<()> {
    let id = resolve_skill_id(ctx, &args.skill)?;

    let (skill, logged, sessions) = match args.minutes {
        Some(0) => {
            return Err(SklogError::ValidationFailed(
                "practice minutes must be at least 1".to_string(),
            ));
        }
        Some(minutes) => (log_minutes(ctx, &id, minutes, &args.skill)?, minutes, 0),
        None => run_timer(ctx, &id, args)?,
    };

    let report = PracticeReport {
        skill,
        logged_minutes: logged,
        focus_sessions: sessions,
    };
    if emit_machine(ctx.output_format, &report)? {
        return Ok(());
    }
    println!(
        "{} Logged {} on {} (total {})",
        "✓".green().bold(),
        format_minutes(u64::from(logged)),
        report.skill.name.cyan(),
        format_minutes(u64::from(report.skill.practice_time))
    );
    Ok(())
}

fn log_minutes(ctx: &mut AppContext, id: &SkillId, minutes: u32, reference: &str) -> Result<Skill> {
    let outcome = ctx.controller.dispatch(Action::AddPracticeMinutes {
        id: id.clone(),
        minutes,
    })?;
    expect_skill(outcome, reference)
}

/// Run `args.sessions` focus intervals. Each finished focus interval is
/// logged before the following break starts; an interrupted interval is
/// not logged.
fn run_timer(ctx: &mut AppContext, id: &SkillId, args: &PracticeArgs) -> Result<(Skill, u32, u32)> {
    if args.sessions == 0 {
        return Err(SklogError::ValidationFailed(
            "sessions must be at least 1".to_string(),
        ));
    }

    let mut timer = PracticeTimer::new(ctx.config.timer);
    let show_progress = ctx.is_human();
    let mut logged = 0_u32;
    let mut latest = None;

    while timer.completed_focus_sessions() < args.sessions {
        let phase = timer.phase();
        let seconds = timer.current_seconds();
        debug!(target: "practice", phase = phase.label(), seconds, "interval started");
        count_down(phase, seconds, show_progress);

        let outcome = timer.complete_interval();
        if let Some(minutes) = outcome.practice_minutes {
            latest = Some(log_minutes(ctx, id, minutes, &args.skill)?);
            logged = logged.saturating_add(minutes);
            info!(
                target: "practice",
                minutes,
                session = timer.completed_focus_sessions(),
                "focus session logged"
            );
            if show_progress && timer.completed_focus_sessions() < args.sessions {
                println!(
                    "{} Focus session done. {} for {} minutes.",
                    "✓".green().bold(),
                    outcome.next.label(),
                    timer.minutes_for(outcome.next)
                );
            }
        }
    }

    let skill = latest.ok_or_else(|| SklogError::SkillNotFound(args.skill.clone()))?;
    Ok((skill, logged, timer.completed_focus_sessions()))
}

fn count_down(phase: Phase, seconds: u64, show_progress: bool) {
    let bar = if show_progress {
        ProgressBar::new(seconds)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    for elapsed in 0..seconds {
        bar.set_message(format!("{} {}", phase.label(), format_clock(seconds - elapsed)));
        thread::sleep(Duration::from_secs(1));
        bar.inc(1);
    }
    bar.finish_and_clear();
}
