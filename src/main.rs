//! Facetgrid CLI application entry point
//!
//! Drives one container headlessly from a catalog file.
//!
//! # Usage
//!
//! ```bash
//! # Show page 1 of a catalog
//! facetgrid show -c catalog.toml
//!
//! # Check tags in order, then go to page 2
//! facetgrid show -c catalog.toml -s color=Red -s size=S --page 2
//!
//! # Press "Load More" twice and print the state as JSON
//! facetgrid show -c catalog.toml --config grid.toml --reveal 2 --json
//!
//! # List categories and tags
//! facetgrid tags -c catalog.toml
//!
//! # Print the effective configuration
//! facetgrid config --config grid.toml
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use colored::Colorize;
use facetgrid::{
    GridError,
    catalog::Catalog,
    cli::{Cli, Commands, parse_selection},
    config::ContainerConfig,
    container::Container,
    output,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Result<T> = std::result::Result<T, GridError>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ContainerConfig> {
    Ok(path.map(ContainerConfig::load).transpose()?.unwrap_or_default())
}

fn build_container(catalog_path: &Path, config_path: Option<&Path>) -> Result<Container> {
    let mut config = load_config(config_path)?;
    let catalog = Catalog::load(catalog_path)?;
    catalog.apply_to(&mut config)?;

    Ok(Container::builder()
        .config(config)
        .raw_items(catalog.raw_items()?)
        .build())
}

struct ShowArgs<'a> {
    catalog: &'a Path,
    config: Option<&'a Path>,
    select: &'a [String],
    page: Option<usize>,
    reveal: usize,
    all: bool,
}

fn handle_show_command(args: &ShowArgs<'_>, quiet: bool, json: bool) -> Result<()> {
    let mut container = build_container(args.catalog, args.config)?;

    for raw in args.select {
        let (category, tag) = parse_selection(raw)
            .ok_or_else(|| GridError::InvalidInput(format!("Invalid selection '{raw}'")))?;
        if !container.tag_index().contains(&category, &tag) {
            tracing::warn!(%category, %tag, "no item carries this tag");
        }
        let event = container.toggle(category, tag, true);
        tracing::info!(%event, "selection applied");
    }

    if let Some(page) = args.page
        && !container.go_to_page(page)
    {
        tracing::warn!(page, "page not available, staying on current page");
    }
    for _ in 0..args.reveal {
        if !container.reveal_more() {
            break;
        }
    }
    container.settle();

    if json {
        println!("{}", serde_json::to_string_pretty(&container.snapshot())?);
        return Ok(());
    }

    if !quiet {
        println!(
            "{} {} ({} matching)",
            "Selection:".bold(),
            container.selection(),
            container.visible_set().len()
        );
    }

    for item in container.items() {
        if item.currently_visible || (args.all && !quiet) {
            println!("{}", output::item_line(item, item.currently_visible, quiet));
        }
    }

    if !quiet {
        if let Some(line) = output::no_results_line(container.no_results()) {
            println!("{line}");
        }
        if let Some(line) = output::controls_line(&container.pagination_view()) {
            println!("{line}");
        }
    }

    Ok(())
}

fn handle_tags_command(
    catalog: &Path,
    config: Option<&Path>,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let container = build_container(catalog, config)?;
    let index = container.tag_index();

    if json {
        println!("{}", serde_json::to_string_pretty(index)?);
        return Ok(());
    }

    if index.is_empty() {
        if !quiet {
            println!("No tags found in catalog.");
        }
        return Ok(());
    }

    for listing in index.categories() {
        if !quiet {
            println!("{}", output::category_heading(listing));
        }
        for count in &listing.tags {
            println!("{}", output::tag_with_count(count, quiet));
        }
    }

    Ok(())
}

fn handle_config_command(config: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let json = cli.json;

    match &cli.command {
        Commands::Show {
            catalog,
            config,
            select,
            page,
            reveal,
            all,
        } => {
            let args = ShowArgs {
                catalog,
                config: config.as_deref(),
                select,
                page: *page,
                reveal: *reveal,
                all: *all,
            };
            handle_show_command(&args, quiet, json)
        }
        Commands::Tags { catalog, config } => {
            handle_tags_command(catalog, config.as_deref(), quiet, json)
        }
        Commands::Config { config } => handle_config_command(config.as_deref(), json),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse_args();

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
