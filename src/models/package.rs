use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An ingredient role within a sandwich recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ingredient {
    Meat,
    Cheese,
    Bread,
    PeanutButter,
    Jelly,
}

impl Ingredient {
    pub const ALL: [Ingredient; 5] = [
        Ingredient::Meat,
        Ingredient::Cheese,
        Ingredient::Bread,
        Ingredient::PeanutButter,
        Ingredient::Jelly,
    ];

    /// Wire key, matching the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Ingredient::Meat => "meat",
            Ingredient::Cheese => "cheese",
            Ingredient::Bread => "bread",
            Ingredient::PeanutButter => "peanutButter",
            Ingredient::Jelly => "jelly",
        }
    }

    /// Human-readable label, capitalized for table output.
    pub fn title(self) -> &'static str {
        match self {
            Ingredient::Meat => "Meat",
            Ingredient::Cheese => "Cheese",
            Ingredient::Bread => "Bread",
            Ingredient::PeanutButter => "Peanut butter",
            Ingredient::Jelly => "Jelly",
        }
    }

    /// Noun used when counting purchased units.
    pub fn unit_noun(self) -> &'static str {
        match self {
            Ingredient::Meat | Ingredient::Cheese => "packages",
            Ingredient::Bread => "loaves",
            Ingredient::PeanutButter | Ingredient::Jelly => "jars",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title().to_lowercase())
    }
}

impl FromStr for Ingredient {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "meat" => Ok(Ingredient::Meat),
            "cheese" => Ok(Ingredient::Cheese),
            "bread" => Ok(Ingredient::Bread),
            "peanutbutter" | "pb" => Ok(Ingredient::PeanutButter),
            "jelly" => Ok(Ingredient::Jelly),
            _ => Err(format!("unknown ingredient '{}'", s)),
        }
    }
}

/// How much one package holds. The forms are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capacity {
    /// Meat sold by weight.
    WeightOz(f64),
    /// Meat, cheese, or bread sold by slice count.
    Slices(u32),
    /// Items rated directly in sandwiches per package.
    Servings(f64),
    /// Spreads sold by volume.
    Tablespoons(f64),
}

impl Capacity {
    pub fn unit(&self) -> &'static str {
        match self {
            Capacity::WeightOz(_) => "oz",
            Capacity::Slices(_) => "slices",
            Capacity::Servings(_) => "servings",
            Capacity::Tablespoons(_) => "tbsp",
        }
    }

    pub fn amount(&self) -> f64 {
        match *self {
            Capacity::WeightOz(v) | Capacity::Servings(v) | Capacity::Tablespoons(v) => v,
            Capacity::Slices(v) => v as f64,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.unit())
    }
}

/// One purchasable unit of an ingredient.
///
/// Price and capacity are optional on the wire; the calculator rejects a
/// package whose price is missing, and falls back to recipe defaults for
/// items whose yield has a sensible default (bread, peanut butter, jelly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPackage", into = "RawPackage")]
pub struct Package {
    pub name: String,
    pub price: Option<f64>,
    pub capacity: Option<Capacity>,
    /// Per-package override of the recipe's ounces of meat per sandwich.
    pub meat_oz_per_sandwich: Option<f64>,
}

impl Package {
    fn new(name: &str, price: f64, capacity: Option<Capacity>) -> Self {
        Self {
            name: name.to_string(),
            price: Some(price),
            capacity,
            meat_oz_per_sandwich: None,
        }
    }

    pub fn by_weight(name: &str, weight_oz: f64, price: f64) -> Self {
        Self::new(name, price, Some(Capacity::WeightOz(weight_oz)))
    }

    pub fn by_slices(name: &str, slices: u32, price: f64) -> Self {
        Self::new(name, price, Some(Capacity::Slices(slices)))
    }

    pub fn by_servings(name: &str, servings: f64, price: f64) -> Self {
        Self::new(name, price, Some(Capacity::Servings(servings)))
    }

    pub fn by_tablespoons(name: &str, tbsp: f64, price: f64) -> Self {
        Self::new(name, price, Some(Capacity::Tablespoons(tbsp)))
    }

    /// A package whose yield comes from the recipe defaults.
    pub fn priced(name: &str, price: f64) -> Self {
        Self::new(name, price, None)
    }

    pub fn with_meat_oz_per_sandwich(mut self, oz: f64) -> Self {
        self.meat_oz_per_sandwich = Some(oz);
        self
    }
}

/// Wire shape of a package, where the capacity form is whichever field is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPackage {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight_oz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slices: Option<u32>,
    #[serde(
        default,
        alias = "sandwiches",
        alias = "sandwichesPerPackage",
        skip_serializing_if = "Option::is_none"
    )]
    servings: Option<f64>,
    #[serde(default, alias = "tbspPerJar", skip_serializing_if = "Option::is_none")]
    tbsp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meat_oz_per_sandwich: Option<f64>,
}

impl TryFrom<RawPackage> for Package {
    type Error = String;

    fn try_from(raw: RawPackage) -> Result<Self, Self::Error> {
        let forms = [
            raw.weight_oz.map(Capacity::WeightOz),
            raw.slices.map(Capacity::Slices),
            raw.servings.map(Capacity::Servings),
            raw.tbsp.map(Capacity::Tablespoons),
        ];
        let mut present = forms.into_iter().flatten();
        let capacity = present.next();
        if present.next().is_some() {
            return Err(
                "package capacity must be exactly one of weightOz, slices, servings, tbsp"
                    .to_string(),
            );
        }

        Ok(Package {
            name: raw.name.unwrap_or_else(|| "Custom".to_string()),
            price: raw.price,
            capacity,
            meat_oz_per_sandwich: raw.meat_oz_per_sandwich,
        })
    }
}

impl From<Package> for RawPackage {
    fn from(package: Package) -> Self {
        let mut raw = RawPackage {
            name: Some(package.name),
            price: package.price,
            meat_oz_per_sandwich: package.meat_oz_per_sandwich,
            ..Default::default()
        };
        match package.capacity {
            Some(Capacity::WeightOz(v)) => raw.weight_oz = Some(v),
            Some(Capacity::Slices(v)) => raw.slices = Some(v),
            Some(Capacity::Servings(v)) => raw.servings = Some(v),
            Some(Capacity::Tablespoons(v)) => raw.tbsp = Some(v),
            None => {}
        }
        raw
    }
}
