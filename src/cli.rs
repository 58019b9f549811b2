use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::Catalog;
use crate::error::{OrderError, Result};
use crate::models::{
    CalculationTarget, Capacity, Ingredient, OrderRequest, Package, SandwichKind, SandwichOrder,
};
use crate::planner::constants::RecipeConstants;

/// Sandwich order calculator for volunteer sandwich-making events.
#[derive(Parser, Debug)]
#[command(name = "sandwich_order")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a product catalog JSON file (built-in prices if missing).
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Calculate packages and cost for a sandwich count or a budget.
    Calculate(CalculateArgs),

    /// Suggest sandwich counts that waste fewer package units.
    Suggest {
        /// Target sandwich count.
        #[arg(long)]
        target: u32,

        /// Sandwiches per package for each ingredient (comma-separated).
        #[arg(long, value_delimiter = ',', required = true)]
        yields: Vec<u32>,
    },

    /// Cross-check a previously computed order from a JSON file.
    Verify {
        /// Verification request JSON (sandwichType, frontendResults).
        path: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List catalog products.
    Products {
        /// Only list one ingredient (meat, cheese, bread, pb, jelly).
        #[arg(long)]
        category: Option<Ingredient>,
    },

    /// Guided calculation with interactive prompts.
    #[default]
    Interactive,

    /// Write the built-in catalog to a JSON file for editing.
    InitCatalog {
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Price and size overrides for one ingredient's package.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageFlags {
    pub price: Option<f64>,
    pub weight_oz: Option<f64>,
    pub slices: Option<u32>,
    pub servings: Option<f64>,
    pub tbsp: Option<f64>,
}

impl PackageFlags {
    fn capacity(&self, ingredient: Ingredient) -> Result<Option<Capacity>> {
        let forms = [
            self.weight_oz.map(Capacity::WeightOz),
            self.slices.map(Capacity::Slices),
            self.servings.map(Capacity::Servings),
            self.tbsp.map(Capacity::Tablespoons),
        ];
        let mut present = forms.into_iter().flatten();
        let capacity = present.next();
        if present.next().is_some() {
            return Err(OrderError::InvalidInput(format!(
                "give only one package size for {}",
                ingredient
            )));
        }
        Ok(capacity)
    }

    /// Start from a catalog product (if any) and apply the overrides.
    pub fn resolve(
        &self,
        catalog: &Catalog,
        ingredient: Ingredient,
        product_id: Option<&str>,
    ) -> Result<Package> {
        let mut package = match product_id {
            Some(id) => catalog.package(ingredient, id)?,
            None => Package {
                name: format!("Custom {}", ingredient),
                price: None,
                capacity: None,
                meat_oz_per_sandwich: None,
            },
        };
        if let Some(price) = self.price {
            package.price = Some(price);
        }
        if let Some(capacity) = self.capacity(ingredient)? {
            package.capacity = Some(capacity);
        }
        Ok(package)
    }
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Sandwich type: deli or pbj.
    pub kind: SandwichKind,

    /// Number of sandwiches to make.
    #[arg(long, conflicts_with = "budget", required_unless_present = "budget")]
    pub count: Option<u32>,

    /// Spending cap in dollars.
    #[arg(long)]
    pub budget: Option<f64>,

    /// Catalog product id for the meat.
    #[arg(long, help_heading = "Products")]
    pub meat: Option<String>,
    /// Catalog product id for the cheese.
    #[arg(long, help_heading = "Products")]
    pub cheese: Option<String>,
    /// Catalog product id for the bread.
    #[arg(long, help_heading = "Products")]
    pub bread: Option<String>,
    /// Catalog product id for the peanut butter.
    #[arg(long, help_heading = "Products")]
    pub pb: Option<String>,
    /// Catalog product id for the jelly.
    #[arg(long, help_heading = "Products")]
    pub jelly: Option<String>,

    /// Price of one meat package.
    #[arg(long, help_heading = "Custom packages")]
    pub meat_price: Option<f64>,
    /// Meat package weight in ounces.
    #[arg(long, help_heading = "Custom packages")]
    pub meat_oz: Option<f64>,
    /// Meat package slice count.
    #[arg(long, help_heading = "Custom packages")]
    pub meat_slices: Option<u32>,
    /// Price of one cheese package.
    #[arg(long, help_heading = "Custom packages")]
    pub cheese_price: Option<f64>,
    /// Cheese slices per package.
    #[arg(long, help_heading = "Custom packages")]
    pub cheese_slices: Option<u32>,
    /// Price of one loaf.
    #[arg(long, help_heading = "Custom packages")]
    pub bread_price: Option<f64>,
    /// Sandwiches per loaf.
    #[arg(long, help_heading = "Custom packages")]
    pub bread_servings: Option<f64>,
    /// Bread slices per loaf (heels excluded).
    #[arg(long, help_heading = "Custom packages")]
    pub bread_slices: Option<u32>,
    /// Price of one peanut butter jar.
    #[arg(long, help_heading = "Custom packages")]
    pub pb_price: Option<f64>,
    /// Sandwiches per peanut butter jar.
    #[arg(long, help_heading = "Custom packages")]
    pub pb_servings: Option<f64>,
    /// Tablespoons per peanut butter jar.
    #[arg(long, help_heading = "Custom packages")]
    pub pb_tbsp: Option<f64>,
    /// Price of one jelly jar.
    #[arg(long, help_heading = "Custom packages")]
    pub jelly_price: Option<f64>,
    /// Sandwiches per jelly jar.
    #[arg(long, help_heading = "Custom packages")]
    pub jelly_servings: Option<f64>,
    /// Tablespoons per jelly jar.
    #[arg(long, help_heading = "Custom packages")]
    pub jelly_tbsp: Option<f64>,

    /// Ounces of meat per sandwich.
    #[arg(long, help_heading = "Recipe")]
    pub meat_oz_per_sandwich: Option<f64>,
    /// Slices of cheese per sandwich.
    #[arg(long, help_heading = "Recipe")]
    pub cheese_slices_per_sandwich: Option<f64>,
    /// Tablespoons of peanut butter per sandwich.
    #[arg(long, help_heading = "Recipe")]
    pub pb_tbsp_per_sandwich: Option<f64>,
    /// Tablespoons of jelly per sandwich.
    #[arg(long, help_heading = "Recipe")]
    pub jelly_tbsp_per_sandwich: Option<f64>,

    /// Print the full plan as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write a CSV shopping list.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Prior result JSON to cross-check against this calculation.
    #[arg(long, value_name = "PATH")]
    pub verify: Option<PathBuf>,
}

impl CalculateArgs {
    pub fn target(&self) -> Result<CalculationTarget> {
        match (self.count, self.budget) {
            (Some(n), None) => Ok(CalculationTarget::Count(n)),
            (None, Some(b)) => Ok(CalculationTarget::Budget(b)),
            _ => Err(OrderError::InvalidInput(
                "give exactly one of --count or --budget".to_string(),
            )),
        }
    }

    fn flags(&self, ingredient: Ingredient) -> (Option<&str>, PackageFlags) {
        match ingredient {
            Ingredient::Meat => (
                self.meat.as_deref(),
                PackageFlags {
                    price: self.meat_price,
                    weight_oz: self.meat_oz,
                    slices: self.meat_slices,
                    ..Default::default()
                },
            ),
            Ingredient::Cheese => (
                self.cheese.as_deref(),
                PackageFlags {
                    price: self.cheese_price,
                    slices: self.cheese_slices,
                    ..Default::default()
                },
            ),
            Ingredient::Bread => (
                self.bread.as_deref(),
                PackageFlags {
                    price: self.bread_price,
                    servings: self.bread_servings,
                    slices: self.bread_slices,
                    ..Default::default()
                },
            ),
            Ingredient::PeanutButter => (
                self.pb.as_deref(),
                PackageFlags {
                    price: self.pb_price,
                    servings: self.pb_servings,
                    tbsp: self.pb_tbsp,
                    ..Default::default()
                },
            ),
            Ingredient::Jelly => (
                self.jelly.as_deref(),
                PackageFlags {
                    price: self.jelly_price,
                    servings: self.jelly_servings,
                    tbsp: self.jelly_tbsp,
                    ..Default::default()
                },
            ),
        }
    }

    /// Build the order from catalog ids and custom flags.
    pub fn to_request(&self, catalog: &Catalog) -> Result<OrderRequest> {
        let [first, second, bread] = self.kind.ingredients().map(|i| {
            let (id, flags) = self.flags(i);
            flags.resolve(catalog, i, id)
        });

        Ok(OrderRequest {
            order: SandwichOrder::from_packages(self.kind, [first?, second?, bread?]),
            target: self.target()?,
        })
    }

    /// Command-line recipe overrides on top of the catalog's recipe.
    pub fn recipe(&self, base: &RecipeConstants) -> RecipeConstants {
        let mut recipe = base.clone();
        if let Some(v) = self.meat_oz_per_sandwich {
            recipe.meat_oz_per_sandwich = v;
        }
        if let Some(v) = self.cheese_slices_per_sandwich {
            recipe.cheese_slices_per_sandwich = v;
        }
        if let Some(v) = self.pb_tbsp_per_sandwich {
            recipe.pb_tbsp_per_sandwich = v;
        }
        if let Some(v) = self.jelly_tbsp_per_sandwich {
            recipe.jelly_tbsp_per_sandwich = v;
        }
        recipe
    }
}
