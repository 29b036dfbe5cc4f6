//! sklog init - Create a project-local data root

use std::path::Path;

use clap::Args;
use colored::Colorize;
use tracing::debug;

use crate::app;
use crate::cli::output::{OutputFormat, emit_machine};
use crate::error::Result;
use crate::storage::FileStore;

const CONFIG_TEMPLATE: &str = r#"# sklog project configuration. Every key is optional.

[display]
# newest | oldest | name-asc | name-desc | level
default_sort = "newest"
timeline_limit = 5

[timer]
focus_minutes = 25
short_break_minutes = 5
long_break_minutes = 15
long_break_every = 4

[decay]
medium_days = 30
high_days = 60
critical_days = 90
cert_expiry_warning_days = 90

[challenges]
daily_count = 3
"#;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite config.toml even if the data root already exists
    #[arg(long, short)]
    pub force: bool,
}

/// Runs before any data root is resolved, so it needs no context.
pub fn run_without_context(format: OutputFormat, args: &InitArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let root = app::init_root(&cwd);
    let created = initialize(&root, args.force)?;
    debug!(target: "init", root = %root.display(), created, "init complete");

    let data = serde_json::json!({
        "root": root.display().to_string(),
        "created": created,
    });
    if emit_machine(format, &data)? {
        return Ok(());
    }

    if created {
        println!(
            "{} Initialized sklog in {}",
            "✓".green().bold(),
            root.display().to_string().cyan()
        );
    } else {
        println!(
            "{} sklog already initialized in {}",
            "!".yellow(),
            root.display().to_string().cyan()
        );
    }
    Ok(())
}

/// Create the store directory and a commented config. Returns whether
/// anything was written.
pub fn initialize(root: &Path, force: bool) -> Result<bool> {
    let config_path = root.join("config.toml");
    let existed = root.join("store").is_dir();
    FileStore::open(root.join("store"))?;

    if force || !config_path.exists() {
        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        return Ok(true);
    }
    Ok(!existed)
}
