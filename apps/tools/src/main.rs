use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog::{parse_price, preset_link, section_slug, sort_presets, Catalog};
use clap::{Parser, Subcommand};
use shared::domain::SortKey;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// JSON catalog file; the built-in catalog when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Sections,
    List {
        #[arg(long, default_value = "name-asc")]
        sort: SortKey,
    },
    Show {
        section: String,
        preset: String,
    },
    Check,
}

/// `RUST_LOG` directives when given and valid, otherwise warnings only.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let catalog = Catalog::load(cli.catalog.as_deref()).context("failed to load catalog")?;

    match cli.command {
        Command::Sections => {
            for section in catalog.sections() {
                println!(
                    "{}\t{}\t{} presets",
                    section_slug(&section.title),
                    section.title,
                    section.presets.len()
                );
            }
        }
        Command::List { sort } => {
            for section in catalog.sections() {
                println!("{} ({})", section.title, sort.label());
                for preset in sort_presets(&section.presets, sort) {
                    println!(
                        "  {:<24} {:>10}  {}",
                        preset.name,
                        preset.price,
                        preset_link(&section.title, &preset.name)
                    );
                }
            }
        }
        Command::Show { section, preset } => {
            let (found_section, found) = catalog
                .preset_by_slugs(&section, &preset)
                .with_context(|| format!("no preset at /presets/{section}/{preset}"))?;
            println!("{}", found.name);
            println!("section: {}", found_section.title);
            match parse_price(&found.price) {
                Some(value) => println!("price: {} ({value:.2})", found.price),
                None => println!("price: {} (not a number)", found.price),
            }
            println!("image: {}", found.image);
            println!("{}", found.description);
        }
        Command::Check => {
            let unpriced = catalog
                .sections()
                .iter()
                .flat_map(|section| &section.presets)
                .filter(|preset| parse_price(&preset.price).is_none())
                .count();
            println!(
                "ok: {} sections, {} presets, {unpriced} without a numeric price",
                catalog.sections().len(),
                catalog.preset_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
