// CLI layer: command definitions and their execution

pub mod addons;
pub mod commands;
pub mod display;
pub mod image;
pub mod lifecycle;
pub mod status;

pub use commands::CliArgs;

use crate::domain::setup::{self, SetupConfig};
use crate::infrastructure::host;
use crate::shared::error::CliError;

const NOT_INSTALLED_MSG: &str =
    "You have not installed the cluster yet, please run 'winkube install' first";
const CORRUPTED_MSG: &str = "Errors occurred during installation. The cluster is in a corrupted \
                             state. Please uninstall and reinstall it.";

/// Reads the setup config for a command that requires an installed cluster.
///
/// A missing installation is reported as a warning and yields `None`, so the
/// command can exit gracefully; a corrupted installation is a hard error.
pub(crate) fn read_setup_for_command() -> anyhow::Result<Option<SetupConfig>> {
    match setup::read_config(&host::config_dir()?) {
        Ok(config) => Ok(Some(config)),
        Err(CliError::SystemNotInstalled) => {
            display::print_warning(NOT_INSTALLED_MSG);
            Ok(None)
        }
        Err(err @ CliError::SystemInCorruptedState) => {
            display::print_failure(CORRUPTED_MSG);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
