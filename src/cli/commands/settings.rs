//! sklog settings - Show or change preferences

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::core::controller::Action;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommand>,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Turn the dark mode preference on or off
    DarkMode {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub fn run(ctx: &mut AppContext, args: &SettingsArgs) -> Result<()> {
    if let Some(SettingsCommand::DarkMode { state }) = &args.command {
        ctx.controller
            .dispatch(Action::SetDarkMode(*state == Toggle::On))?;
    }

    let settings = *ctx.controller.settings();
    if emit_machine(ctx.output_format, settings)? {
        return Ok(());
    }
    let value = if settings.dark_mode { "on" } else { "off" };
    if ctx.output_format == OutputFormat::Plain {
        println!("dark_mode\t{value}");
    } else {
        println!("{:<12} {}", "dark mode".bold(), value.cyan());
    }
    Ok(())
}
