//! Catalog data model and loader.
//!
//! The catalog is a static TOML file describing collections of
//! environment-module records. It is parsed once at startup into an
//! immutable [`Catalog`] value; everything downstream only borrows it.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;

/// Maximum length for collection names (sanity limit)
const MAX_COLLECTION_NAME_LENGTH: usize = 64;

/// NewType wrapper for a collection name with validation.
///
/// Collection names are case-sensitive identifiers such as `MPI`,
/// `Python` or `Bioinformatics`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(CatalogError::MalformedCatalog {
                details: "collection name cannot be empty".to_string(),
            });
        }

        if name.len() > MAX_COLLECTION_NAME_LENGTH {
            return Err(CatalogError::MalformedCatalog {
                details: format!(
                    "collection name '{}' is too long ({} bytes). Maximum allowed: {} bytes",
                    name,
                    name.len(),
                    MAX_COLLECTION_NAME_LENGTH
                ),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(CatalogError::MalformedCatalog {
                details: format!(
                    "collection name '{}' contains invalid characters. \
                     Only alphanumeric, hyphens and underscores are allowed.",
                    name
                ),
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry: a module version, optionally pinned to a compiler,
/// carrying zero or more packages with their per-package dependencies.
///
/// `dependencies` is kept parallel to `packages`: `dependencies[i]` is the
/// dependency of `packages[i]`, `None` when that package has none. The
/// loader enforces equal lengths so readers never have to re-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub version: String,
    pub compiler: Option<String>,
    pub packages: Vec<String>,
    pub dependencies: Vec<Option<String>>,
}

/// A named group of records, in catalog-declaration order.
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: CollectionName,
    pub records: Vec<Record>,
}

/// The full, immutable catalog. Owns every collection and record.
#[derive(Debug, Clone)]
pub struct Catalog {
    collections: Vec<Collection>,
}

// Raw TOML schema. Kept separate from the domain types so serde quirks
// (missing arrays, empty strings for "no dependency") never leak past
// the loader.

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default, rename = "collection")]
    collections: Vec<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    name: String,
    #[serde(default, rename = "record")]
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    version: String,
    #[serde(default)]
    compiler: Option<String>,
    #[serde(default)]
    packages: Vec<String>,
    #[serde(default)]
    dependencies: Option<Vec<String>>,
}

impl Catalog {
    /// Load the catalog from a TOML file.
    ///
    /// Distinguishes a missing file (`CatalogNotFound`) from unparseable
    /// or inconsistent content (`MalformedCatalog`).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::CatalogNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass --catalog with the path to your catalog TOML file, \
                             or set 'catalog' in modcat.config.yml"
                    .to_string(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::MalformedCatalog {
                details: format!("failed to read {}: {}", path.display(), e),
            })?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog =
            toml::from_str(content).map_err(|e| CatalogError::MalformedCatalog {
                details: format!("invalid TOML: {}", e),
            })?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut collections = Vec::with_capacity(raw.collections.len());

        for raw_collection in raw.collections {
            let name = CollectionName::new(raw_collection.name)?;

            if !seen.insert(name.as_str().to_string()) {
                return Err(CatalogError::MalformedCatalog {
                    details: format!("duplicate collection name '{}'", name),
                });
            }

            let mut records = Vec::with_capacity(raw_collection.records.len());
            for raw_record in raw_collection.records {
                records.push(normalize_record(&name, raw_record)?);
            }

            collections.push(Collection { name, records });
        }

        Ok(Catalog { collections })
    }

    /// Collection names in declaration order.
    pub fn collection_names(&self) -> impl Iterator<Item = &CollectionName> {
        self.collections.iter().map(|c| &c.name)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Every record belonging to any of the requested collections.
    ///
    /// An empty `names` slice selects all collections in declaration
    /// order; otherwise collections come back in caller order. Records
    /// within a collection always keep declaration order. A name with no
    /// matching collection is an error, never silently skipped -- an
    /// empty result must stay distinguishable from a typo.
    pub fn records_for(
        &self,
        names: &[CollectionName],
    ) -> Result<Vec<(&CollectionName, &Record)>, CatalogError> {
        let selected: Vec<&Collection> = if names.is_empty() {
            self.collections.iter().collect()
        } else {
            let mut selected = Vec::with_capacity(names.len());
            for name in names {
                let collection = self
                    .collections
                    .iter()
                    .find(|c| c.name == *name)
                    .ok_or_else(|| {
                        CatalogError::unknown_collection(
                            name.as_str(),
                            self.collection_names().map(|n| n.as_str()),
                        )
                    })?;
                selected.push(collection);
            }
            selected
        };

        Ok(selected
            .into_iter()
            .flat_map(|c| c.records.iter().map(move |r| (&c.name, r)))
            .collect())
    }
}

/// Normalize a raw record into the domain shape, enforcing the
/// packages/dependencies alignment invariant.
fn normalize_record(
    collection: &CollectionName,
    raw: RawRecord,
) -> Result<Record, CatalogError> {
    if raw.version.trim().is_empty() {
        return Err(CatalogError::MalformedCatalog {
            details: format!("collection '{}': record with empty version", collection),
        });
    }

    if raw.packages.iter().any(|p| p.trim().is_empty()) {
        return Err(CatalogError::MalformedCatalog {
            details: format!(
                "collection '{}': record '{}' lists an empty package identifier",
                collection, raw.version
            ),
        });
    }

    let dependencies = match raw.dependencies {
        // Omitted (or explicitly empty): no package has a dependency.
        None => vec![None; raw.packages.len()],
        Some(deps) if deps.is_empty() => vec![None; raw.packages.len()],
        Some(deps) => {
            if deps.len() != raw.packages.len() {
                return Err(CatalogError::MalformedCatalog {
                    details: format!(
                        "collection '{}': record '{}' has {} packages but {} dependencies",
                        collection,
                        raw.version,
                        raw.packages.len(),
                        deps.len()
                    ),
                });
            }
            // An empty string means "this package has no dependency".
            deps.into_iter()
                .map(|d| if d.trim().is_empty() { None } else { Some(d) })
                .collect()
        }
    };

    let compiler = raw.compiler.filter(|c| !c.trim().is_empty());

    Ok(Record {
        version: raw.version,
        compiler,
        packages: raw.packages,
        dependencies,
    })
}
