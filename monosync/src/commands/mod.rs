//! Command implementations for the CLI.

mod audit;
mod build;
mod bump;
mod delete;
mod ls;
mod publish;
mod run;
mod sync;
mod watch;

use anyhow::Result;
use monosync_core::settings::CONFIG_FILE_NAME;
use monosync_core::{load_settings, Error, LoadOptions, Settings};
use owo_colors::OwoColorize;

pub use audit::cmd_audit;
pub use build::cmd_build;
pub use bump::cmd_bump;
pub use delete::cmd_delete;
pub use ls::cmd_ls;
pub use publish::cmd_publish;
pub use run::cmd_run;
pub use sync::cmd_sync;
pub use watch::cmd_watch;

/// Loads settings, failing with the standard not-found message when no
/// descriptor exists anywhere above the current directory.
///
/// A descriptor that exists but cannot be parsed is a user-fixable
/// config problem, not a crash: the path and cause are printed as a
/// warning and `None` comes back so the command stops cleanly.
fn require_settings(options: LoadOptions) -> Result<Option<Settings>> {
    match load_settings(options) {
        Ok(Some(settings)) => Ok(Some(settings)),
        Ok(None) => Err(anyhow::anyhow!(
            "No '{}' found in this directory or any parent directory.",
            CONFIG_FILE_NAME
        )),
        Err(Error::DescriptorParse { path, source }) => {
            println!(
                "  {} Could not parse {}: {}",
                "WARNING:".yellow(),
                path.display(),
                source
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn print_no_packages() {
    println!("  {} No packages matched", "WARNING:".yellow());
}
