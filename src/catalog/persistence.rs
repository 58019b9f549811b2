use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::database::{Catalog, Product, ProductEntry};
use crate::error::Result;
use crate::models::Ingredient;
use crate::planner::constants::RecipeConstants;

/// On-disk catalog: recipe overrides plus products grouped by ingredient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub recipe: RecipeConstants,
    #[serde(default)]
    pub products: BTreeMap<Ingredient, BTreeMap<String, ProductEntry>>,
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        let products = file
            .products
            .into_iter()
            .flat_map(|(category, entries)| {
                entries.into_iter().map(move |(id, entry)| Product {
                    id,
                    category,
                    store: entry.store,
                    package: entry.package,
                })
            })
            .collect();
        Catalog::new(file.recipe, products)
    }
}

impl From<&Catalog> for CatalogFile {
    fn from(catalog: &Catalog) -> Self {
        let mut products: BTreeMap<Ingredient, BTreeMap<String, ProductEntry>> = BTreeMap::new();
        for product in catalog.all() {
            products.entry(product.category).or_default().insert(
                product.id.clone(),
                ProductEntry {
                    package: product.package.clone(),
                    store: product.store.clone(),
                },
            );
        }
        CatalogFile {
            recipe: catalog.recipe.clone(),
            products,
        }
    }
}

/// Load a catalog from a JSON file.
///
/// Ids are deduplicated case-insensitively (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path.as_ref())?;
    let file: CatalogFile = serde_json::from_str(&content)?;
    file.recipe.validate()?;

    let catalog = Catalog::from(file);
    info!(
        path = %path.as_ref().display(),
        products = catalog.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Save a catalog to a JSON file.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(&CatalogFile::from(catalog))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the catalog at `path` if given and present, else the built-in one.
pub fn load_or_builtin(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) if p.exists() => load_catalog(p),
        Some(p) => {
            debug!(path = %p.display(), "catalog file not found, using built-in prices");
            Ok(Catalog::builtin())
        }
        None => Ok(Catalog::builtin()),
    }
}
