//! sklog challenges - Today's challenges and points

use clap::{Args, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::app::AppContext;
use crate::challenges::ChallengeBoard;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ChallengesArgs {
    #[command(subcommand)]
    pub command: Option<ChallengesCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ChallengesCommand {
    /// Show today's challenges (drawing a new set on a new day)
    List,

    /// Mark a challenge done and collect its points
    Complete {
        /// Position in today's list, starting at 1
        position: usize,
    },
}

pub fn run(ctx: &mut AppContext, args: &ChallengesArgs) -> Result<()> {
    let today = ctx.controller.store().clock().today();
    let daily_count = ctx.config.challenges.daily_count;
    let kv = ctx.controller.store_mut().kv_mut();

    let mut board = ChallengeBoard::load(&*kv);
    if board.refresh(kv, today, daily_count, &mut rand::rng()) {
        debug!(target: "challenges", %today, "new daily challenges");
    }

    match &args.command {
        None | Some(ChallengesCommand::List) => list(ctx.output_format, &board),
        Some(ChallengesCommand::Complete { position }) => {
            let completion = board.complete(kv, *position)?;
            if emit_machine(ctx.output_format, &completion)? {
                return Ok(());
            }
            if completion.awarded == 0 {
                println!(
                    "{} Already completed: {}",
                    "!".yellow().bold(),
                    completion.challenge.text
                );
            } else {
                println!(
                    "{} {} (+{} points, {} total)",
                    "✓".green().bold(),
                    completion.challenge.text,
                    completion.awarded,
                    completion.total_points
                );
            }
            if board.all_completed() {
                println!("{}", "All of today's challenges are done.".green());
            }
            Ok(())
        }
    }
}

fn list(format: OutputFormat, board: &ChallengeBoard) -> Result<()> {
    if emit_machine(format, board)? {
        return Ok(());
    }
    for (index, challenge) in board.challenges.iter().enumerate() {
        if format == OutputFormat::Plain {
            println!(
                "{}\t{}\t{}\t{}",
                index + 1,
                challenge.completed,
                challenge.points,
                challenge.text
            );
            continue;
        }
        let mark = if challenge.completed {
            "✓".green().bold()
        } else {
            "○".dimmed()
        };
        println!(
            "{} {}. {} {}",
            mark,
            index + 1,
            challenge.text,
            format!("+{}", challenge.points).cyan()
        );
    }
    if format != OutputFormat::Plain {
        println!();
        println!(
            "{} {}/{} done, {} points",
            "Progress:".bold(),
            board.completed_count(),
            board.challenges.len(),
            board.points
        );
    }
    Ok(())
}
