use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::package::{Ingredient, Package};
use crate::models::suggestion::PackageSize;

/// What the caller wants: an exact sandwich count, or a spending cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CalculationTarget {
    Count(u32),
    Budget(f64),
}

impl fmt::Display for CalculationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationTarget::Count(n) => write!(f, "{} sandwiches", n),
            CalculationTarget::Budget(b) => write!(f, "${:.2} budget", b),
        }
    }
}

/// The two supported recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SandwichKind {
    Deli,
    Pbj,
}

impl SandwichKind {
    /// Ingredients in the order they are priced and reported.
    pub fn ingredients(self) -> [Ingredient; 3] {
        match self {
            SandwichKind::Deli => [Ingredient::Meat, Ingredient::Cheese, Ingredient::Bread],
            SandwichKind::Pbj => [
                Ingredient::PeanutButter,
                Ingredient::Jelly,
                Ingredient::Bread,
            ],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SandwichKind::Deli => "deli",
            SandwichKind::Pbj => "PB&J",
        }
    }
}

impl fmt::Display for SandwichKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SandwichKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deli" => Ok(SandwichKind::Deli),
            "pbj" | "pb&j" | "pb-and-j" => Ok(SandwichKind::Pbj),
            other => Err(format!("unknown sandwich type '{}' (expected deli or pbj)", other)),
        }
    }
}

/// The ingredient triple for one recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sandwichType", rename_all = "lowercase")]
pub enum SandwichOrder {
    Deli {
        meat: Package,
        cheese: Package,
        bread: Package,
    },
    Pbj {
        #[serde(rename = "peanutButter")]
        peanut_butter: Package,
        jelly: Package,
        bread: Package,
    },
}

impl SandwichOrder {
    pub fn kind(&self) -> SandwichKind {
        match self {
            SandwichOrder::Deli { .. } => SandwichKind::Deli,
            SandwichOrder::Pbj { .. } => SandwichKind::Pbj,
        }
    }

    /// Packages paired with their ingredient, in `SandwichKind::ingredients` order.
    pub fn packages(&self) -> [(Ingredient, &Package); 3] {
        match self {
            SandwichOrder::Deli {
                meat,
                cheese,
                bread,
            } => [
                (Ingredient::Meat, meat),
                (Ingredient::Cheese, cheese),
                (Ingredient::Bread, bread),
            ],
            SandwichOrder::Pbj {
                peanut_butter,
                jelly,
                bread,
            } => [
                (Ingredient::PeanutButter, peanut_butter),
                (Ingredient::Jelly, jelly),
                (Ingredient::Bread, bread),
            ],
        }
    }

    /// Assemble an order from packages given in `SandwichKind::ingredients` order.
    pub fn from_packages(kind: SandwichKind, packages: [Package; 3]) -> Self {
        let [first, second, bread] = packages;
        match kind {
            SandwichKind::Deli => SandwichOrder::Deli {
                meat: first,
                cheese: second,
                bread,
            },
            SandwichKind::Pbj => SandwichOrder::Pbj {
                peanut_butter: first,
                jelly: second,
                bread,
            },
        }
    }

    pub fn package(&self, ingredient: Ingredient) -> Option<&Package> {
        self.packages()
            .into_iter()
            .find(|(i, _)| *i == ingredient)
            .map(|(_, p)| p)
    }
}

/// A full calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order: SandwichOrder,
    pub target: CalculationTarget,
}

/// A priced ingredient with a derived yield, the calculator's unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageYield {
    pub ingredient: Ingredient,
    pub product: String,
    pub price: f64,
    /// Sandwiches one package can produce. May be fractional for weight-based meat.
    pub yield_per_package: f64,
}

impl PackageYield {
    pub fn new(ingredient: Ingredient, product: &str, price: f64, yield_per_package: f64) -> Self {
        Self {
            ingredient,
            product: product.to_string(),
            price,
            yield_per_package,
        }
    }
}

/// Purchase line for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub ingredient: Ingredient,
    pub product: String,
    pub price: f64,
    pub yield_per_package: f64,
    pub packages: u32,
    pub cost: f64,
    /// Sandwich-equivalents bought beyond the sandwich count.
    pub extra_sandwiches: f64,
}

/// Leftover ingredient in its native unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leftover {
    pub ingredient: Ingredient,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderWarning {
    /// The budget cannot buy one package of every ingredient.
    InsufficientBudget,
}

impl fmt::Display for OrderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderWarning::InsufficientBudget => {
                f.write_str("Budget is too small to buy one package of every ingredient")
            }
        }
    }
}

/// Calculator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub target: CalculationTarget,
    /// Target count in count mode, largest affordable count in budget mode.
    pub sandwich_count: u32,
    pub lines: Vec<OrderLine>,
    pub total_cost: f64,
    pub cost_per_sandwich: f64,
    /// Whole sandwiches the purchased packages can actually make.
    pub achievable_sandwiches: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leftovers: Vec<Leftover>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<OrderWarning>,
}

impl OrderResult {
    pub fn line(&self, ingredient: Ingredient) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.ingredient == ingredient)
    }

    pub fn packages(&self, ingredient: Ingredient) -> Option<u32> {
        self.line(ingredient).map(|l| l.packages)
    }

    pub fn extra_sandwiches(&self, ingredient: Ingredient) -> Option<f64> {
        self.line(ingredient).map(|l| l.extra_sandwiches)
    }

    /// Integral package yields, as used by the quantity optimizer.
    ///
    /// Weight-based yields are floored: only whole sandwiches count toward alignment.
    pub fn packaging(&self) -> Vec<PackageSize> {
        self.lines
            .iter()
            .map(|l| PackageSize::new(l.ingredient.key(), l.yield_per_package.floor() as u32))
            .collect()
    }

    pub fn is_budget_exhausted(&self) -> bool {
        self.warnings.contains(&OrderWarning::InsufficientBudget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_wire_format() {
        let target: CalculationTarget =
            serde_json::from_str(r#"{"kind": "count", "value": 100}"#).unwrap();
        assert_eq!(target, CalculationTarget::Count(100));

        let budget: CalculationTarget =
            serde_json::from_str(r#"{"kind": "budget", "value": 50.5}"#).unwrap();
        assert_eq!(budget, CalculationTarget::Budget(50.5));
    }

    #[test]
    fn test_order_tagged_by_sandwich_type() {
        let json = r#"{
            "sandwichType": "pbj",
            "peanutButter": {"servings": 25, "price": 3.5},
            "jelly": {"servings": 30, "price": 2.5},
            "bread": {"sandwiches": 10, "price": 2.0}
        }"#;
        let order: SandwichOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.kind(), SandwichKind::Pbj);
        assert_eq!(order.packages()[0].0, Ingredient::PeanutButter);
        assert!(order.package(Ingredient::Meat).is_none());
    }

    #[test]
    fn test_sandwich_kind_from_str() {
        assert_eq!("PBJ".parse::<SandwichKind>(), Ok(SandwichKind::Pbj));
        assert_eq!("deli".parse::<SandwichKind>(), Ok(SandwichKind::Deli));
        assert!("club".parse::<SandwichKind>().is_err());
    }
}
