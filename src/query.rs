//! Query engine: selection, filtering and row flattening.
//!
//! Turns a (collections, filter) request against an immutable [`Catalog`]
//! into a flat sequence of [`DisplayRow`]s. Matching is record-level: if
//! any field of a record contains the filter text, every row expanded
//! from that record is emitted.

use serde::Serialize;

use crate::catalog::{Catalog, CollectionName, Record};
use crate::error::CatalogError;

/// One renderable line of output: a (record, package) pairing.
///
/// A record with N packages flattens into N rows sharing the same
/// version and compiler; a record with no packages flattens into a
/// single row with empty package and dependency. Rows own their data,
/// nothing points back into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub collection: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
}

/// Run a full query: select records from the requested collections,
/// keep those matching the filter, and flatten each survivor into
/// display rows.
///
/// An empty `collections` slice means every collection in the catalog;
/// an empty or absent `filter` matches every record. Output order is
/// deterministic: collections in selection order, records in catalog
/// order, packages in record order.
///
/// A zero-length result is a normal outcome, not an error. The only
/// failure here is [`CatalogError::UnknownCollection`].
pub fn query(
    catalog: &Catalog,
    collections: &[CollectionName],
    filter: Option<&str>,
) -> Result<Vec<DisplayRow>, CatalogError> {
    let records = catalog.records_for(collections)?;

    Ok(records
        .into_iter()
        .filter(|(_, record)| record_matches(record, filter))
        .flat_map(|(name, record)| flatten(name, record))
        .collect())
}

/// Case-insensitive substring match across every field of a record:
/// version, compiler, each package and each dependency. Any single hit
/// makes the whole record match.
pub fn record_matches(record: &Record, filter: Option<&str>) -> bool {
    let filter = match filter {
        None => return true,
        Some(f) if f.is_empty() => return true,
        Some(f) => f.to_lowercase(),
    };

    let contains = |field: &str| field.to_lowercase().contains(&filter);

    contains(&record.version)
        || record.compiler.as_deref().is_some_and(contains)
        || record.packages.iter().any(|p| contains(p))
        || record
            .dependencies
            .iter()
            .flatten()
            .any(|d| contains(d))
}

/// Expand one record into its display rows, one per package, preserving
/// package order. Package-less records still produce one row so the
/// module version itself stays visible.
pub fn flatten(collection: &CollectionName, record: &Record) -> Vec<DisplayRow> {
    if record.packages.is_empty() {
        return vec![DisplayRow {
            collection: collection.as_str().to_string(),
            version: record.version.clone(),
            compiler: record.compiler.clone(),
            package: None,
            dependency: None,
        }];
    }

    record
        .packages
        .iter()
        .zip(record.dependencies.iter())
        .map(|(package, dependency)| DisplayRow {
            collection: collection.as_str().to_string(),
            version: record.version.clone(),
            compiler: record.compiler.clone(),
            package: Some(package.clone()),
            dependency: dependency.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        version: &str,
        compiler: Option<&str>,
        packages: &[(&str, Option<&str>)],
    ) -> Record {
        Record {
            version: version.to_string(),
            compiler: compiler.map(str::to_string),
            packages: packages.iter().map(|(p, _)| p.to_string()).collect(),
            dependencies: packages
                .iter()
                .map(|(_, d)| d.map(str::to_string))
                .collect(),
        }
    }

    fn name(s: &str) -> CollectionName {
        CollectionName::new(s).unwrap()
    }

    #[test]
    fn test_flatten_pairs_packages_with_dependencies() {
        let rec = record(
            "openmpi/4.1.6",
            Some("gcc/10.3.0"),
            &[
                ("phdf5/1.12.1", Some("szip/2.1.1")),
                ("mpifileutils/0.10.2-arcts", None),
            ],
        );

        let rows = flatten(&name("MPI"), &rec);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].package.as_deref(), Some("phdf5/1.12.1"));
        assert_eq!(rows[0].dependency.as_deref(), Some("szip/2.1.1"));
        assert_eq!(rows[1].package.as_deref(), Some("mpifileutils/0.10.2-arcts"));
        assert_eq!(rows[1].dependency, None);
        // Shared fields repeat on every row.
        assert!(rows.iter().all(|r| r.version == "openmpi/4.1.6"));
        assert!(rows
            .iter()
            .all(|r| r.compiler.as_deref() == Some("gcc/10.3.0")));
    }

    #[test]
    fn test_flatten_empty_packages_yields_one_row() {
        let rec = record("matlab/2023a", None, &[]);
        let rows = flatten(&name("Math"), &rec);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].version, "matlab/2023a");
        assert_eq!(rows[0].package, None);
        assert_eq!(rows[0].dependency, None);
    }

    #[test]
    fn test_record_matches_empty_filter_is_vacuous() {
        let rec = record("openmpi/4.1.2", None, &[]);
        assert!(record_matches(&rec, None));
        assert!(record_matches(&rec, Some("")));
    }

    #[test]
    fn test_record_matches_version_case_insensitive() {
        let rec = record("OpenMPI/4.1.2", None, &[]);
        assert!(record_matches(&rec, Some("openmpi")));
        assert!(record_matches(&rec, Some("OPENMPI")));
        assert!(!record_matches(&rec, Some("mpich")));
    }

    #[test]
    fn test_record_matches_compiler_field() {
        let rec = record("openmpi/4.1.2", Some("intel/2022.1.2"), &[]);
        assert!(record_matches(&rec, Some("intel")));
    }

    #[test]
    fn test_record_matches_package_and_dependency_fields() {
        let rec = record(
            "openmpi/4.1.2",
            Some("gcc/10.3.0"),
            &[("phdf5/1.12.1", Some("szip/2.1.1"))],
        );
        assert!(record_matches(&rec, Some("phdf5")));
        assert!(record_matches(&rec, Some("szip")));
        assert!(!record_matches(&rec, Some("netcdf")));
    }

    #[test]
    fn test_query_record_level_matching_emits_all_rows() {
        // The filter hits the version only; both package rows must
        // still come out, including the one whose own fields miss.
        let catalog = Catalog::from_toml_str(
            r#"
[[collection]]
name = "MPI"

[[collection.record]]
version = "openmpi/4.1.4"
compiler = "intel/2022.1.2"
packages = ["fftw_mpi/3.3.10", "parmetis/4.0.3"]
"#,
        )
        .unwrap();

        let rows = query(&catalog, &[], Some("open")).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].package.as_deref(), Some("fftw_mpi/3.3.10"));
        assert_eq!(rows[1].package.as_deref(), Some("parmetis/4.0.3"));
    }

    #[test]
    fn test_query_no_matches_is_empty_not_error() {
        let catalog = Catalog::from_toml_str(
            r#"
[[collection]]
name = "MPI"

[[collection.record]]
version = "openmpi/4.1.2"
"#,
        )
        .unwrap();

        let rows = query(&catalog, &[], Some("no-such-text")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_unknown_collection_is_error() {
        let catalog = Catalog::from_toml_str(
            r#"
[[collection]]
name = "MPI"
"#,
        )
        .unwrap();

        let result = query(&catalog, &[name("Fortran")], None);
        assert!(matches!(
            result,
            Err(CatalogError::UnknownCollection { .. })
        ));
    }

    #[test]
    fn test_query_is_idempotent() {
        let catalog = Catalog::from_toml_str(
            r#"
[[collection]]
name = "MPI"

[[collection.record]]
version = "openmpi/4.1.2"
compiler = "gcc/10.3.0"
packages = ["phdf5/1.12.1"]
dependencies = ["szip/2.1.1"]

[[collection]]
name = "Python"

[[collection.record]]
version = "python/3.10.4"
packages = ["numpy/1.22.3"]
"#,
        )
        .unwrap();

        let first = query(&catalog, &[], Some("1")).unwrap();
        let second = query(&catalog, &[], Some("1")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_empty_collections_means_all() {
        let catalog = Catalog::from_toml_str(
            r#"
[[collection]]
name = "MPI"
[[collection.record]]
version = "openmpi/4.1.2"

[[collection]]
name = "Python"
[[collection.record]]
version = "python/3.10.4"
"#,
        )
        .unwrap();

        let rows = query(&catalog, &[], None).unwrap();
        let collections: Vec<&str> = rows.iter().map(|r| r.collection.as_str()).collect();
        assert_eq!(collections, vec!["MPI", "Python"]);
    }
}
