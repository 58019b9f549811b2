use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};
use crate::models::SandwichKind;

// ─────────────────────────────────────────────────────────────────────────────
// Recipe defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Ounces of weight-based meat per deli sandwich.
pub const DEFAULT_MEAT_OZ_PER_SANDWICH: f64 = 2.5;

/// Slices of slice-counted meat per deli sandwich.
pub const DEFAULT_MEAT_SLICES_PER_SANDWICH: f64 = 3.0;

/// Slices of cheese per deli sandwich.
pub const DEFAULT_CHEESE_SLICES_PER_SANDWICH: f64 = 2.0;

/// Slices of bread per sandwich.
pub const DEFAULT_BREAD_SLICES_PER_SANDWICH: f64 = 2.0;

/// Tablespoons of peanut butter per sandwich.
pub const DEFAULT_PB_TBSP_PER_SANDWICH: f64 = 3.0;

/// Tablespoons of jelly per sandwich.
pub const DEFAULT_JELLY_TBSP_PER_SANDWICH: f64 = 1.5;

/// Sandwiches per standard loaf (20 slices minus the heels).
pub const DEFAULT_BREAD_SANDWICHES_PER_PACKAGE: f64 = 10.0;

/// Sandwiches per 16 oz peanut butter jar.
pub const DEFAULT_PB_SERVINGS_PER_JAR: f64 = 25.0;

/// Sandwiches per 18 oz jelly jar.
pub const DEFAULT_JELLY_SERVINGS_PER_JAR: f64 = 30.0;

// ─────────────────────────────────────────────────────────────────────────────
// Calculator and optimizer
// ─────────────────────────────────────────────────────────────────────────────

/// Relative slack applied to ceil/floor so that float noise never buys an extra package.
pub const YIELD_EPSILON: f64 = 1e-9;

/// Maximum alternative quantities returned by the optimizer.
pub const MAX_SUGGESTIONS: usize = 3;

/// Candidates beyond this multiple of the target are discarded.
pub const SUGGESTION_RANGE_FACTOR: u64 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Verification
// ─────────────────────────────────────────────────────────────────────────────

/// Plausible cost-per-sandwich band for deli orders.
pub const DELI_COST_BAND: (f64, f64) = (0.50, 5.00);

/// Plausible cost-per-sandwich band for PB&J orders.
pub const PBJ_COST_BAND: (f64, f64) = (0.20, 2.00);

/// Allowed drift between reported total and item sum, per sandwich.
pub const COST_TOLERANCE_PER_SANDWICH: f64 = 0.02;

pub fn cost_band(kind: SandwichKind) -> (f64, f64) {
    match kind {
        SandwichKind::Deli => DELI_COST_BAND,
        SandwichKind::Pbj => PBJ_COST_BAND,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Insight thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Cost per sandwich below which an order is "great", and above which it is "high".
pub const DELI_COST_ASSESSMENT: (f64, f64) = (1.50, 2.50);
pub const PBJ_COST_ASSESSMENT: (f64, f64) = (0.50, 1.00);

/// Orders above this size get a split-shopping warning.
pub const LARGE_ORDER_THRESHOLD: u32 = 300;

/// Extra bread capacity that triggers a waste-reduction tip.
pub const BREAD_EXTRA_TIP_THRESHOLD: f64 = 5.0;

/// Orders above this size get a per-volunteer estimate.
pub const VOLUNTEER_ESTIMATE_THRESHOLD: u32 = 50;

/// Sandwiches per volunteer per session, optimistic and conservative.
pub const SANDWICHES_PER_VOLUNTEER_FAST: u32 = 75;
pub const SANDWICHES_PER_VOLUNTEER_SLOW: u32 = 50;

/// Ratios converting one sandwich into ingredient consumption.
///
/// Every field can be overridden by the catalog file or per request;
/// missing fields fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeConstants {
    pub meat_oz_per_sandwich: f64,
    pub meat_slices_per_sandwich: f64,
    pub cheese_slices_per_sandwich: f64,
    pub bread_slices_per_sandwich: f64,
    pub pb_tbsp_per_sandwich: f64,
    pub jelly_tbsp_per_sandwich: f64,
    pub bread_sandwiches_per_package: f64,
    pub pb_servings_per_jar: f64,
    pub jelly_servings_per_jar: f64,
}

impl Default for RecipeConstants {
    fn default() -> Self {
        Self {
            meat_oz_per_sandwich: DEFAULT_MEAT_OZ_PER_SANDWICH,
            meat_slices_per_sandwich: DEFAULT_MEAT_SLICES_PER_SANDWICH,
            cheese_slices_per_sandwich: DEFAULT_CHEESE_SLICES_PER_SANDWICH,
            bread_slices_per_sandwich: DEFAULT_BREAD_SLICES_PER_SANDWICH,
            pb_tbsp_per_sandwich: DEFAULT_PB_TBSP_PER_SANDWICH,
            jelly_tbsp_per_sandwich: DEFAULT_JELLY_TBSP_PER_SANDWICH,
            bread_sandwiches_per_package: DEFAULT_BREAD_SANDWICHES_PER_PACKAGE,
            pb_servings_per_jar: DEFAULT_PB_SERVINGS_PER_JAR,
            jelly_servings_per_jar: DEFAULT_JELLY_SERVINGS_PER_JAR,
        }
    }
}

impl RecipeConstants {
    /// All ratios must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("meatOzPerSandwich", self.meat_oz_per_sandwich),
            ("meatSlicesPerSandwich", self.meat_slices_per_sandwich),
            ("cheeseSlicesPerSandwich", self.cheese_slices_per_sandwich),
            ("breadSlicesPerSandwich", self.bread_slices_per_sandwich),
            ("pbTbspPerSandwich", self.pb_tbsp_per_sandwich),
            ("jellyTbspPerSandwich", self.jelly_tbsp_per_sandwich),
            ("breadSandwichesPerPackage", self.bread_sandwiches_per_package),
            ("pbServingsPerJar", self.pb_servings_per_jar),
            ("jellyServingsPerJar", self.jelly_servings_per_jar),
        ];

        match fields
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((name, value)) => Err(OrderError::InvalidRecipe(format!(
                "{} must be positive, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(RecipeConstants::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let recipe = RecipeConstants {
            cheese_slices_per_sandwich: 0.0,
            ..Default::default()
        };
        let err = recipe.validate().unwrap_err();
        assert!(err.to_string().contains("cheeseSlicesPerSandwich"));
    }

    #[test]
    fn test_partial_override_from_json() {
        let recipe: RecipeConstants = serde_json::from_str(r#"{"meatOzPerSandwich": 3}"#).unwrap();
        assert_eq!(recipe.meat_oz_per_sandwich, 3.0);
        assert_eq!(recipe.cheese_slices_per_sandwich, DEFAULT_CHEESE_SLICES_PER_SANDWICH);
    }
}
