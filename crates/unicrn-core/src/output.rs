//! Console narration for command results

use crate::error::CatalogError;
use crate::product::ProductConfig;
use crate::project::{
    AddReport, FileOutcome, InitReport, Removal, RemoveReport, Step, ThemeReport,
};
use crate::registry::{EntryKind, Registry};
use colored::Colorize;
use std::path::Path;

fn relative<'a>(root: &Path, path: &'a Path) -> std::borrow::Cow<'a, str> {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy()
}

/// Print an error that stopped one requested name
pub fn print_error(err: &CatalogError) {
    eprintln!("{} {}", "Error:".red().bold(), err);
}

fn print_file_outcome(root: &Path, outcome: &FileOutcome) {
    match &outcome.result {
        Ok(source) => println!(
            "    {} {} {}",
            "✓".green(),
            relative(root, &outcome.destination),
            format!("({})", source.describe()).dimmed()
        ),
        Err(e) => {
            println!("    {} {}", "✗".red(), relative(root, &outcome.destination));
            eprintln!("      {} {}", "Warning:".yellow(), e);
        }
    }
}

pub fn print_add_report(root: &Path, report: &AddReport) {
    let info = report.entry.info();
    println!(
        "  {} Adding {} {}",
        "->".blue(),
        info.name,
        report.entry.kind().label().to_lowercase()
    );

    for file in &report.files {
        print_file_outcome(root, file);
    }

    if let Err(e) = &report.index {
        eprintln!("    {} {}", "Warning:".yellow(), e);
    }

    if report.is_success() {
        println!("  {} {}", "Added".green().bold(), info.name);
    } else if report.landed() == 0 {
        println!(
            "  {} {} was not copied; the files above need manual copying",
            "Warning:".yellow(),
            info.name
        );
    } else {
        println!(
            "  {} {} partially added ({} of {} files)",
            "Warning:".yellow(),
            info.name,
            report.landed(),
            report.files.len()
        );
    }

    if !info.dependencies.is_empty() {
        println!("    Dependencies needed: {}", info.dependencies.join(", "));
        println!(
            "    {} npm install {}",
            "Run:".dimmed(),
            info.dependencies.join(" ")
        );
    }
}

pub fn print_remove_report(root: &Path, report: &RemoveReport) {
    let info = report.entry.info();
    println!("  {} Removing {}", "->".blue(), info.name);

    for file in &report.files {
        let shown = relative(root, &file.destination);
        match &file.result {
            Ok(Removal::Deleted) => println!("    {} {}", "deleted".green(), shown),
            Ok(Removal::Absent) => println!("    {} {}", "not present".dimmed(), shown),
            Err(e) => eprintln!("    {} {}", "Warning:".yellow(), e),
        }
    }

    if let Err(e) = &report.index {
        eprintln!("    {} {}", "Warning:".yellow(), e);
    }

    if report.is_success() {
        println!("  {} {}", "Removed".green().bold(), info.name);
    }
}

pub fn print_theme_report(root: &Path, report: &ThemeReport) {
    print_file_outcome(root, &report.file);
    if report.file.result.is_ok() {
        println!(
            "{} Theme set to \"{}\"",
            "Done.".green().bold(),
            report.theme.name
        );
    }
}

fn step_label(step: Step) -> colored::ColoredString {
    match step {
        Step::Created => format!("{:>8}", "created").green(),
        Step::Updated => format!("{:>8}", "updated").cyan(),
        Step::Unchanged => format!("{:>8}", "exists").dimmed(),
    }
}

pub fn print_init_report<C: ProductConfig>(product: &C, root: &Path, report: &InitReport) {
    println!(
        "{}",
        format!("Initializing {} in {}", product.display_name(), root.display())
            .cyan()
            .bold()
    );
    println!();

    let steps = std::iter::once(&report.config)
        .chain(report.directories.iter())
        .chain(report.indexes.iter())
        .chain(std::iter::once(&report.entry_point));
    for (path, step) in steps {
        println!("  {} {}", step_label(*step), relative(root, path));
    }

    if let Some(theme) = &report.theme_file {
        print_file_outcome(root, theme);
    }

    println!();
    if report.is_noop() {
        println!("{} Project already initialized", "Done.".green().bold());
        return;
    }
    if report.is_success() {
        println!("{} Project initialized", "Done.".green().bold());
    } else {
        println!(
            "{} Project initialized, but the theme file needs manual copying",
            "Warning:".yellow()
        );
    }

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in product.next_steps().iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}

pub fn print_list(registry: &Registry) {
    for (kind, heading) in [
        (EntryKind::Component, "Available Components"),
        (EntryKind::Hook, "Available Hooks"),
    ] {
        println!();
        println!("{}", heading.cyan().bold());
        println!();
        for info in registry.entries_of(kind) {
            println!("  {:<15} {}", info.key, info.description);
        }
    }
    println!();
    println!("{} unicrn add <name>", "Usage:".dimmed());
}

pub fn print_themes(registry: &Registry) {
    println!();
    println!("{}", "Available Themes".cyan().bold());
    println!();
    for theme in registry.themes() {
        println!("  {:<15} {} theme", theme.key, theme.name);
        println!("  {:<15} {}", "", theme.color_summary().dimmed());
    }
    println!();
    println!("{} unicrn theme <theme-name>", "Usage:".dimmed());
}
