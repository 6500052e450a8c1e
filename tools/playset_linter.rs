//! Playset Linter: reports playset structure and flags content a setup
//! could never draw from.
//!
//! Usage: playset_linter <playset.txt>...

use clap::Parser;
use fiasco_engine::core::loader;
use fiasco_engine::schema::playset::{is_relationships, Playset};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "playset_linter")]
#[command(about = "Check playset files before generating tables from them", long_about = None)]
struct Cli {
    /// Playset text files to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut total_errors = 0;

    for path in &cli.paths {
        println!("\n=== {} ===\n", path.display());
        let playset = match loader::load_from_file(path) {
            Ok(p) => p,
            Err(e) => {
                println!("ERROR: {}", e);
                total_errors += 1;
                continue;
            }
        };

        print_outline(&playset);

        let (errors, warnings) = lint_playset(&playset);
        for warning in &warnings {
            println!("WARNING: {}", warning);
        }
        for error in &errors {
            println!("ERROR: {}", error);
        }
        println!(
            "\nSummary: {} errors, {} warnings",
            errors.len(),
            warnings.len()
        );
        total_errors += errors.len();
    }

    if total_errors > 0 {
        process::exit(1);
    }
}

fn print_outline(playset: &Playset) {
    println!("Playset: {}", playset.name);
    for section in playset.sections() {
        let role = if is_relationships(&section.name) {
            "relationships"
        } else {
            "details"
        };
        println!(
            "  # {} ({}, {} items)",
            section.name,
            role,
            section.item_count()
        );
        for category in section.categories() {
            println!("    ## {} ({} items)", category.name, category.items.len());
        }
    }
}

/// Returns (errors, warnings).
fn lint_playset(playset: &Playset) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match playset.relationships() {
        Ok(section) if section.item_count() == 0 => {
            errors.push("relationships section has no items to draw".to_string());
        }
        Ok(_) => {}
        Err(_) => errors.push("missing relationships section".to_string()),
    }

    if playset.detail_section_names().is_empty() {
        errors.push("no detail sections besides relationships".to_string());
    }

    for section in playset.sections() {
        if !is_relationships(&section.name) && section.item_count() == 0 {
            errors.push(format!("section '{}' has no items to draw", section.name));
        } else if section.is_empty() {
            warnings.push(format!("section '{}' has no categories", section.name));
        }
        for category in section.categories() {
            if category.is_empty() {
                warnings.push(format!(
                    "category '{}' in section '{}' has no items",
                    category.name, section.name
                ));
            }
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_playset_passes() {
        let playset = loader::parse_str(
            "Clean\n# Relationships\n## 1 Family\n1 Cousins\n# Needs\n## 1 Money\n1 To get rich\n",
        )
        .unwrap();
        let (errors, warnings) = lint_playset(&playset);
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn missing_relationships_is_an_error() {
        let playset = loader::parse_str("Odd\n# Needs\n## 1 Money\n1 To get rich\n").unwrap();
        let (errors, _) = lint_playset(&playset);
        assert_eq!(errors, vec!["missing relationships section".to_string()]);
    }

    #[test]
    fn empty_category_is_a_warning() {
        let playset = loader::parse_str(
            "Sparse\n# Relationships\n## 1 Family\n1 Cousins\n## 2 Work\n# Needs\n## 1 Money\n1 To get rich\n",
        )
        .unwrap();
        let (errors, warnings) = lint_playset(&playset);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'work'"));
    }

    #[test]
    fn detail_section_without_categories_is_an_error() {
        let playset = loader::parse_str(
            "P\n# Relationships\n## 1 Family\n1 Cousins\n# Needs\n## 1 Money\n1 To get rich\n# Objects\n",
        )
        .unwrap();
        let (errors, warnings) = lint_playset(&playset);
        assert_eq!(errors, vec!["section 'objects' has no items to draw".to_string()]);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn detail_section_with_only_empty_categories_is_an_error() {
        let playset = loader::parse_str(
            "P\n# Relationships\n## 1 Family\n1 Cousins\n# Needs\n## 1 Money\n",
        )
        .unwrap();
        let (errors, warnings) = lint_playset(&playset);
        assert_eq!(errors, vec!["section 'needs' has no items to draw".to_string()]);
        assert_eq!(warnings.len(), 1);
    }
}
