mod database;
mod persistence;

pub use database::{Catalog, FUZZY_ACCEPT_SCORE, FUZZY_HINT_SCORE, Product, ProductEntry};
pub use persistence::{CatalogFile, load_catalog, load_or_builtin, save_catalog};
