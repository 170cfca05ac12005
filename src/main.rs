use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use repo_version::boundary::BoundaryWarning;
use repo_version::cli::{increase_version, list_versions, show_versions};
use repo_version::config::{self, Config};
use repo_version::git::Git2Repository;
use repo_version::planner::{IncrementPlanner, TickRequest};
use repo_version::scanner::RepositoryIndex;
use repo_version::ui;

#[derive(Parser)]
#[command(
    name = "repo-version",
    version,
    about = "Show and increase semantic versions of git repositories from their tags",
    args_conflicts_with_subcommands = true
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(help = "Repository to show versions of [default: current directory]")]
    path: Option<PathBuf>,

    #[arg(short, long, help = "Show every version instead of only the highest")]
    all: bool,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show versions of every repository below a directory
    List {
        #[arg(short, long, help = "Directory to search [default: current directory]")]
        root: Option<PathBuf>,

        #[arg(short, long, help = "Show every version instead of only the highest")]
        all: bool,
    },

    /// Tag HEAD with the next version
    Increase {
        #[arg(long, help = "Increase the major version")]
        major: bool,

        #[arg(long, help = "Increase the minor version")]
        minor: bool,

        #[arg(long, help = "Increase the patch version (default)")]
        patch: bool,

        #[arg(short, long, help = "Pre-release label, e.g. rc1")]
        special: Option<String>,

        #[arg(short, long, help = "Build metadata; requires a pre-release label")]
        build: Option<String>,

        #[arg(short, long, help = "Repository to tag [default: current directory]")]
        path: Option<PathBuf>,

        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let result = match args.command {
        None => {
            let path = args.path.unwrap_or_else(|| PathBuf::from("."));
            show(&path, args.all, &config)
        }
        Some(Command::List { root, all }) => {
            let root = root.unwrap_or_else(|| PathBuf::from("."));
            list(&root, all, &config, args.verbose)
        }
        Some(Command::Increase {
            major,
            minor,
            patch,
            special,
            build,
            path,
            yes,
        }) => {
            let request = TickRequest {
                major,
                minor,
                patch,
                special,
                build,
            };
            let path = path.unwrap_or_else(|| PathBuf::from("."));
            increase(&path, request, yes, &config)
        }
    };

    if let Err(e) = result {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn show(path: &Path, all: bool, config: &Config) -> Result<()> {
    let index = show_versions(path, all)?;
    print_index(&index, all, config);
    Ok(())
}

fn list(root: &Path, all: bool, config: &Config, verbose: bool) -> Result<()> {
    let index = list_versions(root, all, &config.scan)?;

    for warning in index.warnings() {
        let notable = !matches!(warning, BoundaryWarning::NoVersions { .. });
        if notable || verbose {
            ui::display_boundary_warning(warning);
        }
    }

    print_index(&index, all, config);
    Ok(())
}

fn print_index(index: &RepositoryIndex, all: bool, config: &Config) {
    print!(
        "{}",
        ui::render_version_table(index, all, &config.display.date_format)
    );
}

fn increase(path: &Path, request: TickRequest, yes: bool, config: &Config) -> Result<()> {
    // Request errors are reported before the repository is opened
    let planner = IncrementPlanner::new(request)?;
    let repo = Git2Repository::open(path)?;

    let outcome = increase_version(&repo, planner, &config.tag.message, |plan| {
        print!("{}", ui::render_plan(plan));
        if yes {
            return Ok(true);
        }
        ui::confirm_action(&format!("Create tag {}?", plan.tag_name()))
    })?;

    if outcome.applied() {
        ui::display_success(&format!(
            "Created tag {} on {}",
            outcome.plan.tag_name(),
            outcome.plan.head.short_hash()
        ));
    } else {
        println!("Operation cancelled by user.");
    }

    Ok(())
}
