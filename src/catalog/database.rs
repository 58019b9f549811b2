use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::debug;

use crate::error::{OrderError, Result};
use crate::models::{Ingredient, Package};
use crate::planner::constants::RecipeConstants;

/// Similarity above which a misspelled id is accepted without asking.
pub const FUZZY_ACCEPT_SCORE: f64 = 0.95;

/// Similarity above which the closest id is offered as a hint.
pub const FUZZY_HINT_SCORE: f64 = 0.70;

/// A product a shopper can buy, tagged with the ingredient it supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub category: Ingredient,
    pub store: Option<String>,
    pub package: Package,
}

impl Product {
    pub fn new(id: &str, category: Ingredient, store: &str, package: Package) -> Self {
        Self {
            id: id.to_string(),
            category,
            store: Some(store.to_string()),
            package,
        }
    }

    /// Lookup key: ids are case-insensitive.
    pub fn key(&self) -> String {
        self.id.to_lowercase()
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }
}

/// Wire form of a product; the id and category come from the enclosing maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    #[serde(flatten)]
    pub package: Package,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

static BUILTIN_PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    use Ingredient::*;
    let meat = |id: &str, store: &str, p: Package| Product::new(id, Meat, store, p);
    let cheese = |id: &str, name: &str, slices: u32, price: f64, store: &str| {
        Product::new(id, Cheese, store, Package::by_slices(name, slices, price))
    };
    let bread = |id: &str, name: &str, servings: f64, price: f64, store: &str| {
        Product::new(id, Bread, store, Package::by_servings(name, servings, price))
    };

    vec![
        meat("kroger-turkey-family", "Kroger", Package::by_weight("Kroger Turkey Family Size", 16.0, 4.39)),
        meat("kroger-turkey-thin", "Kroger", Package::by_weight("Kroger Turkey Thin Sliced", 9.0, 3.99)),
        meat("publix-turkey", "Publix", Package::by_weight("Publix Turkey Breast", 16.0, 7.07)),
        meat("kirkland-turkey", "Sam's Club/Costco", Package::by_weight("Kirkland Turkey", 32.0, 13.99)),
        meat("land-o-frost-turkey", "Various", Package::by_weight("Land O'Frost Turkey", 16.0, 9.53)),
        meat("hillshire-turkey", "Various", Package::by_weight("Hillshire Farm Turkey", 9.0, 6.07)),
        meat("oscar-mayer-turkey", "Sam's Club", Package::by_weight("Oscar Mayer Turkey (Sam's Club)", 32.0, 9.97)),
        meat("kirkland-ham", "Sam's Club/Costco", Package::by_slices("Kirkland Ham (2-pack)", 96, 9.89)),
        meat("kroger-ham", "Kroger", Package::by_weight("Kroger Ham", 16.0, 4.99)),
        meat("hillshire-ham", "Various", Package::by_weight("Hillshire Farm Ham", 9.0, 5.49)),
        meat("kroger-chicken-thin", "Kroger", Package::by_weight("Kroger Chicken Thin", 9.0, 3.50)),
        meat("oscar-mayer-chicken-rotisserie", "Various", Package::by_weight("Oscar Mayer Rotisserie Chicken", 16.0, 7.99)),
        meat("oscar-mayer-chicken-blackened", "Various", Package::by_weight("Oscar Mayer Blackened Chicken", 8.0, 4.49)),
        cheese("boars-head-american", "Boar's Head American", 24, 8.99, "Various"),
        cheese("land-o-lakes-american", "Land O'Lakes American", 24, 6.49, "Various"),
        cheese("sargento-american", "Sargento Sliced American", 22, 4.99, "Various"),
        cheese("great-value-american", "Great Value American (Walmart)", 24, 3.98, "Walmart"),
        cheese("kroger-american", "Kroger Deli American", 24, 4.29, "Kroger"),
        bread("great-value-white", "Great Value White", 11.0, 1.48, "Walmart"),
        bread("kroger-white", "Kroger White Sandwich", 11.0, 1.50, "Kroger"),
        bread("wonder-classic", "Wonder Bread Classic White", 10.0, 3.63, "Various"),
        bread("wonder-giant", "Wonder Bread Giant White", 11.0, 4.64, "Various"),
        bread("sara-lee-butter", "Sara Lee Butter Bread", 10.0, 3.14, "Various"),
        bread("sara-lee-classic", "Sara Lee Classic White", 10.0, 3.99, "Various"),
        bread("store-brand-white", "Store Brand White", 10.0, 2.00, "Various"),
        Product::new(
            "store-brand-peanut-butter",
            PeanutButter,
            "Various",
            Package::by_servings("Store Brand Peanut Butter (16 oz)", 25.0, 3.50),
        ),
        Product::new(
            "store-brand-jelly",
            Jelly,
            "Various",
            Package::by_servings("Store Brand Grape Jelly (18 oz)", 30.0, 2.50),
        ),
    ]
});

/// The product database plus the recipe ratios it was priced against.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub recipe: RecipeConstants,
    /// Products keyed by lowercase id.
    products: BTreeMap<String, Product>,
}

impl Catalog {
    /// Build a catalog; a repeated id (ignoring case) replaces the earlier one.
    pub fn new(recipe: RecipeConstants, products: Vec<Product>) -> Self {
        let mut map = BTreeMap::new();
        for product in products {
            map.insert(product.key(), product);
        }
        Self {
            recipe,
            products: map,
        }
    }

    /// The default price list.
    pub fn builtin() -> Self {
        Self::new(RecipeConstants::default(), BUILTIN_PRODUCTS.clone())
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(&id.to_lowercase())
    }

    /// Products supplying one ingredient, ordered by id.
    pub fn by_category(&self, category: Ingredient) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Best-scoring id for a query, with its Jaro-Winkler similarity.
    fn closest<'a>(
        &'a self,
        query: &str,
        category: Option<Ingredient>,
    ) -> Option<(&'a Product, f64)> {
        let query = query.to_lowercase();
        self.products
            .values()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .map(|p| {
                let by_id = jaro_winkler(&p.key(), &query);
                let by_name = jaro_winkler(&p.name().to_lowercase(), &query);
                (p, by_id.max(by_name))
            })
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Look up a product by id or display name, tolerating small typos.
    ///
    /// Exact matches (ignoring case) win. Otherwise the closest product is
    /// accepted when it scores at least [`FUZZY_ACCEPT_SCORE`]; below that the
    /// error names the closest id as a hint.
    pub fn find(&self, query: &str, category: Option<Ingredient>) -> Result<&Product> {
        let in_category = |p: &&Product| category.is_none_or(|c| p.category == c);
        let needle = query.trim().to_lowercase();

        if let Some(product) = self.products.get(&needle).filter(in_category) {
            return Ok(product);
        }
        if let Some(product) = self
            .products
            .values()
            .filter(in_category)
            .find(|p| p.name().to_lowercase() == needle)
        {
            return Ok(product);
        }

        match self.closest(&needle, category) {
            Some((product, score)) if score >= FUZZY_ACCEPT_SCORE => {
                debug!(query, id = %product.id, score, "fuzzy product match");
                Ok(product)
            }
            Some((product, score)) if score >= FUZZY_HINT_SCORE => Err(
                OrderError::ProductNotFound(format!("'{}' (did you mean '{}'?)", query, product.id)),
            ),
            _ => Err(OrderError::ProductNotFound(format!("'{}'", query))),
        }
    }

    /// Package for an ingredient, looked up by product id.
    pub fn package(&self, category: Ingredient, id: &str) -> Result<Package> {
        Ok(self.find(id, Some(category))?.package.clone())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
