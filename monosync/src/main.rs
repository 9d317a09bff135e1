mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use monosync_core::ReleaseType;
use tracing::Level;

#[derive(Parser)]
#[command(name = "monosync")]
#[command(about = "Manage a monorepo of interdependent packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List packages in dependency order
    Ls {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// Which dependencies to show per package
        #[arg(short = 'D', long, value_enum, default_value = "local")]
        deps: DepsArg,
        /// Show the path to each package
        #[arg(short = 'p', long, action)]
        path: bool,
        /// Retrieve latest published versions from the registry
        #[arg(short = 'n', long, action)]
        registry: bool,
        #[arg(long, action)]
        json: bool,
    },
    /// Bump a package version along with its entire dependency graph
    Bump {
        package: String,
        #[arg(short, long, value_enum, default_value = "patch")]
        release: ReleaseArg,
        /// Compute and report everything without saving any file
        #[arg(short = 'd', long, action)]
        dry_run: bool,
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// Local versions only; skip the registry lookup
        #[arg(short = 'l', long, action)]
        local: bool,
    },
    /// Copy each package's local dependency tree into its node_modules
    Sync {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// Also rewrite dependency ranges to the source package versions
        #[arg(short = 'u', long, action)]
        update_versions: bool,
    },
    /// Run a shell command in every package directory, in dependency order
    Run {
        command: String,
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// Run across packages concurrently instead of in order
        #[arg(short = 'c', long, action)]
        concurrent: bool,
    },
    /// Watch package directories and re-sync dependents on change
    Watch {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
    },
    /// Compile every TypeScript package, in dependency order
    Build {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
    },
    /// Report packages whose published version is ahead of the local one
    Audit {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
    },
    /// Publish every package whose local version is ahead of the registry
    Publish {
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// List the publish candidates without running npm
        #[arg(short = 'd', long, action)]
        dry_run: bool,
    },
    /// Delete transient files (logs, lockfiles, node_modules) across packages
    Delete {
        #[arg(value_enum)]
        target: DeleteTarget,
        #[arg(short = 'i', long, action)]
        include_ignored: bool,
        /// List the matches without deleting anything
        #[arg(short = 'd', long, action)]
        dry_run: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum ReleaseArg {
    Major,
    Minor,
    Patch,
}

impl From<ReleaseArg> for ReleaseType {
    fn from(arg: ReleaseArg) -> Self {
        match arg {
            ReleaseArg::Major => ReleaseType::Major,
            ReleaseArg::Minor => ReleaseType::Minor,
            ReleaseArg::Patch => ReleaseType::Patch,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum DepsArg {
    None,
    Local,
    All,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum DeleteTarget {
    Logs,
    YarnLock,
    PackageLock,
    NodeModules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    match cli.command {
        Commands::Ls {
            include_ignored,
            deps,
            path,
            registry,
            json,
        } => commands::cmd_ls(include_ignored, deps, path, registry, json)?,
        Commands::Bump {
            package,
            release,
            dry_run,
            include_ignored,
            local,
        } => commands::cmd_bump(package, release.into(), dry_run, include_ignored, local)?,
        Commands::Sync {
            include_ignored,
            update_versions,
        } => commands::cmd_sync(include_ignored, update_versions)?,
        Commands::Run {
            command,
            include_ignored,
            concurrent,
        } => commands::cmd_run(command, include_ignored, concurrent)?,
        Commands::Watch { include_ignored } => commands::cmd_watch(include_ignored)?,
        Commands::Build { include_ignored } => commands::cmd_build(include_ignored)?,
        Commands::Audit { include_ignored } => commands::cmd_audit(include_ignored)?,
        Commands::Publish {
            include_ignored,
            dry_run,
        } => commands::cmd_publish(include_ignored, dry_run)?,
        Commands::Delete {
            target,
            include_ignored,
            dry_run,
        } => commands::cmd_delete(target, include_ignored, dry_run)?,
    }

    Ok(())
}
