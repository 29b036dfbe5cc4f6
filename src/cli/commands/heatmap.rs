//! sklog heatmap - 365-day activity heatmap

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::error::Result;
use crate::utils::pluralize;
use crate::views::Heatmap;

#[derive(Args, Debug)]
pub struct HeatmapArgs {}

pub fn run(ctx: &mut AppContext, _args: &HeatmapArgs) -> Result<()> {
    let today = ctx.controller.store().clock().today();
    let heatmap = Heatmap::build(ctx.controller.skills(), today);

    if emit_machine(ctx.output_format, &heatmap)? {
        return Ok(());
    }
    if ctx.output_format == OutputFormat::Plain {
        for day in heatmap.days().filter(|day| day.count > 0) {
            println!("{}\t{}\t{}", day.date, day.count, day.level);
        }
        return Ok(());
    }

    println!(
        "{} {} to {}",
        "Activity".bold(),
        heatmap.start,
        heatmap.end
    );
    println!();
    println!("{}", heatmap.render());
    println!();
    println!(
        "{}   {} active, {} total",
        Heatmap::legend().dimmed(),
        pluralize(heatmap.active_days(), "day"),
        pluralize(heatmap.total_activity() as usize, "update")
    );
    Ok(())
}
