//! modcat - module catalog query tool for HPC clusters
//!
//! This library answers one narrow question: given a set of software
//! collections (Compilers, MPI, Python, Bioinformatics, ...) and an
//! optional text filter, which module versions, compilers, packages and
//! dependencies match?
//!
//! The catalog is a static TOML file loaded once into an immutable
//! [`catalog::Catalog`]; [`query::query`] then selects, filters and
//! flattens records into display rows for a renderer to print.
//!
//! # Example
//!
//! ```
//! use modcat::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = Catalog::from_toml_str(
//!     r#"
//! [[collection]]
//! name = "MPI"
//!
//! [[collection.record]]
//! version = "openmpi/4.1.2"
//! compiler = "gcc/10.3.0"
//! packages = ["phdf5/1.12.1"]
//! dependencies = ["szip/2.1.1"]
//! "#,
//! )?;
//!
//! let rows = query(&catalog, &[], Some("open"))?;
//! assert_eq!(rows.len(), 1);
//! println!("{}", render_tables(&rows));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod table;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{Catalog, Collection, CollectionName, Record};
    pub use crate::cli::OutputFormat;
    pub use crate::config::{discover_config, load_config_from_path, ConfigFile};
    pub use crate::error::{CatalogError, ExitCode};
    pub use crate::query::{flatten, query, record_matches, DisplayRow};
    pub use crate::table::render_tables;
}
