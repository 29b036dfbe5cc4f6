use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::output::OutputFormat;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::controller::Controller;
use crate::error::{Result, SklogError};
use crate::storage::FileStore;
use crate::utils::find_upwards;

/// Directory name marking a project-local data root.
pub const ROOT_MARKER: &str = ".sklog";

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub controller: Controller<FileStore>,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;
        let store = FileStore::open(root.join("store"))?;
        debug!(root = %root.display(), "opened data root");

        let controller = Controller::open(
            store,
            Box::new(SystemClock),
            config.categories.defaults.clone(),
        );

        let output_format = if cli.robot && cli.format.is_none() {
            OutputFormat::from_robot_config(&config.robot.format)
        } else {
            cli.output_format()
        };

        Ok(Self {
            root,
            config,
            controller,
            robot_mode: cli.robot,
            output_format,
            verbosity: cli.verbose,
        })
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.output_format == OutputFormat::Human
    }
}

/// `SKLOG_ROOT`, then a `.sklog` directory above the working directory,
/// then the platform data directory.
pub fn find_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("SKLOG_ROOT") {
        return Ok(PathBuf::from(root));
    }
    let cwd = std::env::current_dir()?;
    if let Some(found) = find_upwards(&cwd, ROOT_MARKER) {
        return Ok(found);
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| SklogError::MissingConfig("data directory not found".to_string()))?;
    Ok(data_dir.join("sklog"))
}

/// Where `init` creates a data root: `SKLOG_ROOT` when set, else `.sklog`
/// under `dir`.
#[must_use]
pub fn init_root(dir: &Path) -> PathBuf {
    std::env::var("SKLOG_ROOT").map_or_else(|_| dir.join(ROOT_MARKER), PathBuf::from)
}
