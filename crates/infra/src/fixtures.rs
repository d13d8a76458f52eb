//! JSON fixtures used to seed the in-memory catalog.
//!
//! Layout: `{"products": [...], "lines": [...]}`. Both keys are optional.
//! Lines nest their persisted sub-lines under `items`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use lineforge_products::Product;
use lineforge_sales::LineRecord;

use crate::read_model::InMemoryCatalog;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixtures from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixtures in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

impl CatalogFixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Copy every record into `catalog`, replacing records with the same id.
    pub fn seed(&self, catalog: &InMemoryCatalog) {
        for product in &self.products {
            catalog.upsert_product(product.clone());
        }
        for line in &self.lines {
            catalog.upsert_line(line);
        }
        info!(
            products = catalog.product_count(),
            lines = catalog.line_count(),
            "catalog seeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineforge_products::{ProductId, UpdateType};
    use lineforge_sales::{LineId, LookupPort};
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_and_seeds_nested_lines() {
        let file = write_fixture(
            r#"{
                "products": [
                    {"id": 1, "code": "KIT", "updateType": "PARENT"},
                    {"id": 2, "updateType": null}
                ],
                "lines": [
                    {"id": 10, "quantity": 2, "product": {"id": 1},
                     "items": [{"id": 11, "quantity": 4}]}
                ]
            }"#,
        );

        let fixture = CatalogFixture::load(file.path()).unwrap();
        assert_eq!(fixture.products.len(), 2);

        let catalog = InMemoryCatalog::new();
        fixture.seed(&catalog);

        assert_eq!(catalog.line_count(), 2);
        assert_eq!(catalog.product_count(), 2);
        assert_eq!(catalog.find_line(LineId::from(11)).unwrap().quantity, 4);
        assert_eq!(
            catalog.find_product(ProductId::from(1)).unwrap().update_type(),
            UpdateType::Parent
        );
        assert_eq!(
            catalog.find_product(ProductId::from(2)).unwrap().update_type(),
            UpdateType::None
        );
    }

    #[test]
    fn empty_object_is_an_empty_fixture() {
        let file = write_fixture("{}");
        assert_eq!(CatalogFixture::load(file.path()).unwrap(), CatalogFixture::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogFixture::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }), "{err}");
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let file = write_fixture(r#"{"lines": [{"id": "x"}]}"#);
        let err = CatalogFixture::load(file.path()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }), "{err}");
    }
}
