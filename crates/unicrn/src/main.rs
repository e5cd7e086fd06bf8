//! UNICRN CLI - Unistyles + Components + React Native

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use unicrn_core::{output, HttpFetcher, Project, ProductConfig, Registry};

/// UNICRN product configuration
#[derive(Clone)]
pub struct UnicrnConfig;

impl ProductConfig for UnicrnConfig {
    fn name(&self) -> &'static str {
        "unicrn"
    }

    fn display_name(&self) -> &'static str {
        "UNICRN"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/periabyte/unicrn/main"
    }

    fn registry_url_env(&self) -> &'static str {
        "UNICRN_REGISTRY_URL"
    }

    fn package_name(&self) -> &'static str {
        "unicrn"
    }

    fn config_file_name(&self) -> &'static str {
        "unicrn.config.json"
    }

    fn next_steps(&self) -> Vec<String> {
        vec![
            "Install dependencies: npm install react-native-unistyles react-native-reanimated expo-router"
                .to_string(),
            "Add components: unicrn add button card".to_string(),
            "Import in your app: import { Button } from \"@/components/ui\"".to_string(),
            "Make sure your package.json main field points to \"index.ts\"".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "unicrn")]
#[command(about = "UNICRN CLI - Unistyles + Components + React Native")]
#[command(version)]
pub struct Args {
    /// Project root to operate on (defaults to the current directory)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Local checkout to copy sources from instead of guessing from the executable (for development use)
    #[arg(long = "source-dir", global = true)]
    pub source_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize unicrn in your React Native project
    Init,
    /// Add components or hooks to your project
    Add {
        /// Component or hook names (prompts when omitted)
        names: Vec<String>,
    },
    /// Remove components or hooks from your project
    Remove {
        /// Component or hook names
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List all available components and hooks
    List,
    /// Set the active theme
    Theme {
        /// Theme name to set
        name: String,
    },
    /// List all available themes
    Themes,
}

type CliProject = Project<'static, HttpFetcher>;

async fn run_init(config: &UnicrnConfig, project: &CliProject) -> Result<usize> {
    let report = project
        .init()
        .await
        .context("Failed to initialize project")?;
    output::print_init_report(config, project.root(), &report);
    Ok(usize::from(!report.is_success()))
}

async fn run_add(
    config: &UnicrnConfig,
    project: &CliProject,
    names: Vec<String>,
) -> Result<usize> {
    project.require_initialized(config.name())?;

    let names = if names.is_empty() {
        let picked = unicrn_core::tui::pick_entries(project.registry(), config.display_name());
        let _ = console::Term::stderr().show_cursor();
        picked?
    } else {
        names
    };

    let mut failures = 0;
    for name in &names {
        match project.add(name).await {
            Ok(report) => {
                output::print_add_report(project.root(), &report);
                if !report.is_success() {
                    failures += 1;
                }
            }
            Err(e) => {
                output::print_error(&e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

async fn run_remove(
    config: &UnicrnConfig,
    project: &CliProject,
    names: Vec<String>,
) -> Result<usize> {
    project.require_initialized(config.name())?;

    let mut failures = 0;
    for name in &names {
        match project.remove(name).await {
            Ok(report) => {
                output::print_remove_report(project.root(), &report);
                if !report.is_success() {
                    failures += 1;
                }
            }
            Err(e) => {
                output::print_error(&e);
                failures += 1;
            }
        }
    }
    Ok(failures)
}

async fn run_theme(project: &CliProject, name: &str) -> Result<usize> {
    match project.theme(name).await {
        Ok(report) => {
            output::print_theme_report(project.root(), &report);
            Ok(usize::from(report.file.result.is_err()))
        }
        Err(e) => {
            output::print_error(&e);
            Ok(1)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = UnicrnConfig;
    let registry = Registry::builtin();

    let command = match args.command {
        Command::List => {
            output::print_list(registry);
            return Ok(());
        }
        Command::Themes => {
            output::print_themes(registry);
            return Ok(());
        }
        command => command,
    };

    let root = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let project = Project::open(&config, root, registry, args.source_dir)?;

    let failures = match command {
        Command::Init => run_init(&config, &project).await?,
        Command::Add { names } => run_add(&config, &project, names).await?,
        Command::Remove { names } => run_remove(&config, &project, names).await?,
        Command::Theme { name } => run_theme(&project, &name).await?,
        Command::List | Command::Themes => 0,
    };

    if failures > 0 {
        anyhow::bail!("{} operation(s) did not complete", failures);
    }

    Ok(())
}
