use tracing::{debug, warn};

use crate::error::{OrderError, Result};
use crate::models::{
    CalculationTarget, Capacity, Ingredient, Leftover, OrderLine, OrderResult, OrderWarning,
    Package, PackageYield, SandwichOrder,
};
use crate::planner::constants::{RecipeConstants, YIELD_EPSILON};

/// Round to the nearest integer when within float noise of it.
///
/// The tolerance is relative, so tiny ratios are never snapped to zero.
pub(crate) fn snap_to_integer(value: f64) -> f64 {
    let nearest = value.round();
    if (nearest - value).abs() <= YIELD_EPSILON * value.abs() {
        nearest
    } else {
        value
    }
}

/// Packages needed to cover `count` sandwiches: `ceil(count / yield)`.
pub fn packages_needed(count: f64, yield_per_package: f64) -> u32 {
    snap_to_integer(count / yield_per_package).ceil().max(0.0) as u32
}

/// Whole sandwiches a number of packages can make.
pub fn whole_sandwiches(packages: u32, yield_per_package: f64) -> u32 {
    snap_to_integer(packages as f64 * yield_per_package).floor() as u32
}

/// Largest count below `count` whose purchase drops at least one package.
///
/// Every count in between buys the same packages, so costs the same.
fn next_cheaper_count(lines: &[OrderLine], count: u32) -> u32 {
    lines
        .iter()
        .filter(|l| l.packages > 0)
        .map(|l| whole_sandwiches(l.packages - 1, l.yield_per_package))
        .max()
        .unwrap_or(0)
        .min(count.saturating_sub(1))
}

/// Derive sandwiches per package for an ingredient.
///
/// - Weight-based meat: `weightOz / meatOzPerSandwich`, kept fractional.
/// - Slice-counted items: `floor(slices / slicesPerSandwich)`.
/// - Jars sized in tablespoons: `floor(tbsp / tbspPerSandwich)`.
/// - Servings are taken as given; bread and spreads default when unsized.
pub fn derive_yield(
    ingredient: Ingredient,
    package: &Package,
    recipe: &RecipeConstants,
) -> Result<f64> {
    let per_slice = |slices: u32, per_sandwich: f64| (slices as f64 / per_sandwich).floor();
    let per_tbsp = |tbsp: f64, per_sandwich: f64| (tbsp / per_sandwich).floor();

    let yield_per_package = match (ingredient, package.capacity) {
        (Ingredient::Meat, Some(Capacity::WeightOz(oz))) => {
            let oz_per_sandwich = package
                .meat_oz_per_sandwich
                .unwrap_or(recipe.meat_oz_per_sandwich);
            if !(oz_per_sandwich.is_finite() && oz_per_sandwich > 0.0) {
                return Err(OrderError::package(
                    ingredient,
                    format!("meatOzPerSandwich must be positive, got {}", oz_per_sandwich),
                ));
            }
            oz / oz_per_sandwich
        }
        (Ingredient::Meat, Some(Capacity::Slices(s))) => {
            per_slice(s, recipe.meat_slices_per_sandwich)
        }
        (Ingredient::Cheese, Some(Capacity::Slices(s))) => {
            per_slice(s, recipe.cheese_slices_per_sandwich)
        }
        (Ingredient::Bread, Some(Capacity::Slices(s))) => {
            per_slice(s, recipe.bread_slices_per_sandwich)
        }
        (Ingredient::PeanutButter, Some(Capacity::Tablespoons(t))) => {
            per_tbsp(t, recipe.pb_tbsp_per_sandwich)
        }
        (Ingredient::Jelly, Some(Capacity::Tablespoons(t))) => {
            per_tbsp(t, recipe.jelly_tbsp_per_sandwich)
        }
        (_, Some(Capacity::Servings(n))) => n,
        (Ingredient::Bread, None) => recipe.bread_sandwiches_per_package,
        (Ingredient::PeanutButter, None) => recipe.pb_servings_per_jar,
        (Ingredient::Jelly, None) => recipe.jelly_servings_per_jar,
        (_, None) => {
            return Err(OrderError::package(ingredient, "package size is missing"));
        }
        (_, Some(other)) => {
            return Err(OrderError::package(
                ingredient,
                format!("cannot be sized by {}", other.unit()),
            ));
        }
    };

    if !(yield_per_package.is_finite() && yield_per_package > 0.0) {
        return Err(OrderError::package(
            ingredient,
            format!(
                "'{}' yields no whole sandwiches per package ({})",
                package.name, yield_per_package
            ),
        ));
    }

    Ok(yield_per_package)
}

/// Price a package and derive its yield.
pub fn package_yield(
    ingredient: Ingredient,
    package: &Package,
    recipe: &RecipeConstants,
) -> Result<PackageYield> {
    let price = match package.price {
        Some(p) if p.is_finite() && p > 0.0 => p,
        Some(p) => {
            return Err(OrderError::package(
                ingredient,
                format!("price must be positive, got {}", p),
            ));
        }
        None => return Err(OrderError::package(ingredient, "price is missing")),
    };
    let yield_per_package = derive_yield(ingredient, package, recipe)?;

    Ok(PackageYield::new(
        ingredient,
        &package.name,
        price,
        yield_per_package,
    ))
}

/// Yields for every ingredient of a recipe, in pricing order.
pub fn order_yields(order: &SandwichOrder, recipe: &RecipeConstants) -> Result<Vec<PackageYield>> {
    recipe.validate()?;
    order
        .packages()
        .into_iter()
        .map(|(ingredient, package)| package_yield(ingredient, package, recipe))
        .collect()
}

fn validate_target(target: CalculationTarget) -> Result<()> {
    match target {
        CalculationTarget::Count(0) => Err(OrderError::InvalidTarget(
            "sandwich count must be a positive integer".to_string(),
        )),
        CalculationTarget::Budget(b) if !(b.is_finite() && b > 0.0) => Err(
            OrderError::InvalidTarget(format!("budget must be a positive amount, got {}", b)),
        ),
        _ => Ok(()),
    }
}

fn validate_yields(yields: &[PackageYield]) -> Result<()> {
    if yields.is_empty() {
        return Err(OrderError::InvalidInput(
            "at least one ingredient is required".to_string(),
        ));
    }
    for y in yields {
        if !(y.price.is_finite() && y.price > 0.0) {
            return Err(OrderError::package(
                y.ingredient,
                format!("price must be positive, got {}", y.price),
            ));
        }
        if !(y.yield_per_package.is_finite() && y.yield_per_package > 0.0) {
            return Err(OrderError::package(
                y.ingredient,
                format!("yield must be positive, got {}", y.yield_per_package),
            ));
        }
    }
    Ok(())
}

/// Buy enough of every ingredient for `count` sandwiches.
fn purchase_lines(yields: &[PackageYield], count: u32) -> Vec<OrderLine> {
    yields
        .iter()
        .map(|y| {
            let packages = packages_needed(count as f64, y.yield_per_package);
            OrderLine {
                ingredient: y.ingredient,
                product: y.product.clone(),
                price: y.price,
                yield_per_package: y.yield_per_package,
                packages,
                cost: packages as f64 * y.price,
                extra_sandwiches: packages as f64 * y.yield_per_package - count as f64,
            }
        })
        .collect()
}

fn total_cost(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|l| l.cost).sum()
}

/// The smallest whole-sandwich capacity across ingredients.
fn achievable_sandwiches(lines: &[OrderLine]) -> u32 {
    lines
        .iter()
        .map(|l| whole_sandwiches(l.packages, l.yield_per_package))
        .min()
        .unwrap_or(0)
}

/// Compute an order for an ordered list of priced ingredient yields.
///
/// Count mode buys `ceil(target / yield)` packages of each ingredient.
/// Budget mode starts from the continuous estimate
/// `floor(budget / Σ(price / yield))` and steps down until the rounded-up
/// purchases fit the budget. Running out at zero sandwiches is a valid
/// result flagged with `OrderWarning::InsufficientBudget`.
pub fn compute_order(target: CalculationTarget, yields: &[PackageYield]) -> Result<OrderResult> {
    validate_target(target)?;
    validate_yields(yields)?;

    match target {
        CalculationTarget::Count(count) => {
            let lines = purchase_lines(yields, count);
            let total = total_cost(&lines);
            let achievable = achievable_sandwiches(&lines);
            debug!(count, total, achievable, "priced count-mode order");

            Ok(OrderResult {
                target,
                sandwich_count: count,
                total_cost: total,
                cost_per_sandwich: total / count as f64,
                achievable_sandwiches: achievable,
                lines,
                remaining_budget: None,
                leftovers: Vec::new(),
                warnings: Vec::new(),
            })
        }
        CalculationTarget::Budget(budget) => {
            let per_sandwich: f64 = yields.iter().map(|y| y.price / y.yield_per_package).sum();
            let continuous = (budget / per_sandwich).floor();
            if continuous > u32::MAX as f64 {
                return Err(OrderError::InvalidTarget(format!(
                    "budget of ${:.2} covers more than {} sandwiches",
                    budget,
                    u32::MAX
                )));
            }
            let estimate = continuous as u32;
            let mut count = estimate;

            let (lines, total) = loop {
                let lines = purchase_lines(yields, count);
                let total = total_cost(&lines);
                if total <= budget || count == 0 {
                    break (lines, total);
                }
                count = next_cheaper_count(&lines, count);
            };
            debug!(
                budget,
                per_sandwich,
                estimate,
                count,
                total,
                "converged budget-mode order"
            );

            let mut warnings = Vec::new();
            if count == 0 {
                warn!(budget, "budget cannot cover one package of every ingredient");
                warnings.push(OrderWarning::InsufficientBudget);
            }

            Ok(OrderResult {
                target,
                sandwich_count: count,
                total_cost: total,
                cost_per_sandwich: if count > 0 { total / count as f64 } else { 0.0 },
                achievable_sandwiches: if count > 0 {
                    achievable_sandwiches(&lines)
                } else {
                    0
                },
                lines,
                remaining_budget: Some(budget - total),
                leftovers: Vec::new(),
                warnings,
            })
        }
    }
}

/// Leftover ingredient in native units for packages sized by weight, slices, or volume.
fn native_leftover(
    ingredient: Ingredient,
    package: &Package,
    packages: u32,
    count: u32,
    recipe: &RecipeConstants,
) -> Option<Leftover> {
    let capacity = package.capacity?;
    let per_sandwich = match (ingredient, capacity) {
        (Ingredient::Meat, Capacity::WeightOz(_)) => package
            .meat_oz_per_sandwich
            .unwrap_or(recipe.meat_oz_per_sandwich),
        (Ingredient::Meat, Capacity::Slices(_)) => recipe.meat_slices_per_sandwich,
        (Ingredient::Cheese, Capacity::Slices(_)) => recipe.cheese_slices_per_sandwich,
        (Ingredient::Bread, Capacity::Slices(_)) => recipe.bread_slices_per_sandwich,
        (Ingredient::PeanutButter, Capacity::Tablespoons(_)) => recipe.pb_tbsp_per_sandwich,
        (Ingredient::Jelly, Capacity::Tablespoons(_)) => recipe.jelly_tbsp_per_sandwich,
        _ => return None,
    };

    Some(Leftover {
        ingredient,
        amount: packages as f64 * capacity.amount() - count as f64 * per_sandwich,
        unit: capacity.unit().to_string(),
    })
}

/// Compute an order for a deli or PB&J recipe.
pub fn compute_sandwich_order(
    order: &SandwichOrder,
    target: CalculationTarget,
    recipe: &RecipeConstants,
) -> Result<OrderResult> {
    let yields = order_yields(order, recipe)?;
    let mut result = compute_order(target, &yields)?;

    result.leftovers = order
        .packages()
        .into_iter()
        .filter_map(|(ingredient, package)| {
            let packages = result.packages(ingredient)?;
            native_leftover(ingredient, package, packages, result.sandwich_count, recipe)
        })
        .collect();

    Ok(result)
}
