mod catalog;
mod cli;
mod config;
mod error;
mod query;
mod table;

use std::path::{Path, PathBuf};
use std::process;

use catalog::{Catalog, CollectionName};
use cli::{Args, OutputFormat};
use error::{CatalogError, ExitCode};

const DEFAULT_CATALOG: &str = "modules.toml";

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse_args();

    // Config file: explicit path wins, otherwise auto-discover in the
    // working directory. CLI flags override anything the config sets.
    let config = match args.config.as_deref() {
        Some(path) => config::load_config_from_path(Path::new(path))?,
        None => config::discover_config(Path::new("."))?.unwrap_or_default(),
    };

    let catalog_path = args
        .catalog
        .or(config.catalog)
        .unwrap_or_else(|| DEFAULT_CATALOG.to_string());
    let catalog = Catalog::load(Path::new(&catalog_path))?;

    let requested: Vec<String> = if args.collections.is_empty() {
        config.collections.unwrap_or_default()
    } else {
        args.collections
    };
    let collections = resolve_collections(&catalog, &requested)?;

    let format = args
        .format
        .or_else(|| config.format.as_deref().and_then(|f| f.parse().ok()))
        .unwrap_or(OutputFormat::Table);

    let rows = query::query(&catalog, &collections, args.filter.as_deref())?;

    report_empty_collections(&catalog, &collections, &rows);

    let output = match format {
        OutputFormat::Table => table::render_tables(&rows),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&rows)?;
            json.push('\n');
            json
        }
    };

    present(&output, args.output.as_deref())?;

    Ok(())
}

/// Turn user-supplied collection names into validated identifiers. A
/// name that fails validation cannot name any collection, so it is
/// reported the same way as one missing from the catalog.
fn resolve_collections(
    catalog: &Catalog,
    requested: &[String],
) -> Result<Vec<CollectionName>, CatalogError> {
    requested
        .iter()
        .map(|name| {
            CollectionName::new(name.clone()).map_err(|_| {
                CatalogError::unknown_collection(
                    name,
                    catalog.collection_names().map(|n| n.as_str()),
                )
            })
        })
        .collect()
}

/// Mirror the per-collection "nothing here" notice on stderr so an
/// empty table is never mistaken for a truncated one. Zero matches is
/// still a success.
fn report_empty_collections(
    catalog: &Catalog,
    collections: &[CollectionName],
    rows: &[query::DisplayRow],
) {
    let selected: Vec<&CollectionName> = if collections.is_empty() {
        catalog.collection_names().collect()
    } else {
        collections.iter().collect()
    };

    for name in selected {
        if !rows.iter().any(|r| r.collection == name.as_str()) {
            eprintln!("0 modules found for {}", name);
        }
    }
}

fn present(output: &str, path: Option<&str>) -> Result<(), CatalogError> {
    match path {
        Some(path) => {
            std::fs::write(path, output).map_err(|e| CatalogError::FileWriteError {
                path: PathBuf::from(path),
                details: e.to_string(),
            })
        }
        None => {
            print!("{}", output);
            Ok(())
        }
    }
}
