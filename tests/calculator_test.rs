use assert_float_eq::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sandwich_order_rs::error::OrderError;
use sandwich_order_rs::models::{
    CalculationTarget, Ingredient, OrderWarning, Package, PackageYield, SandwichOrder,
};
use sandwich_order_rs::planner::{
    RecipeConstants, compute_order, compute_sandwich_order, packages_needed,
};

fn deli_order() -> SandwichOrder {
    SandwichOrder::Deli {
        // 16 oz at 2.5 oz per sandwich = 6.4 sandwiches
        meat: Package::by_weight("Turkey", 16.0, 9.97),
        // 44 slices at 2 per sandwich = 22 sandwiches
        cheese: Package::by_slices("American", 44, 4.99),
        bread: Package::by_servings("White", 10.0, 3.28),
    }
}

fn pbj_order() -> SandwichOrder {
    SandwichOrder::Pbj {
        peanut_butter: Package::by_servings("Peanut Butter", 25.0, 3.50),
        jelly: Package::by_servings("Grape Jelly", 30.0, 2.50),
        bread: Package::by_servings("White", 10.0, 2.00),
    }
}

fn random_yields(rng: &mut StdRng) -> Vec<PackageYield> {
    [Ingredient::Meat, Ingredient::Cheese, Ingredient::Bread]
        .into_iter()
        .map(|ingredient| {
            let price = rng.gen_range(100..2000) as f64 / 100.0;
            let yield_per_package = rng.gen_range(20..400) as f64 / 10.0;
            PackageYield::new(ingredient, ingredient.key(), price, yield_per_package)
        })
        .collect()
}

#[test]
fn test_deli_count_mode() {
    let result = compute_sandwich_order(
        &deli_order(),
        CalculationTarget::Count(100),
        &RecipeConstants::default(),
    )
    .unwrap();

    assert_eq!(result.packages(Ingredient::Meat), Some(16));
    assert_eq!(result.packages(Ingredient::Cheese), Some(5));
    assert_eq!(result.packages(Ingredient::Bread), Some(10));
    assert_float_absolute_eq!(result.total_cost, 217.27, 1e-9);
    assert_float_absolute_eq!(result.cost_per_sandwich, 2.1727, 1e-9);
    assert!(result.remaining_budget.is_none());
    assert!(result.warnings.is_empty());

    // 16 packages x 6.4 = 102.4, only whole sandwiches count
    assert_eq!(result.achievable_sandwiches, 100);
    assert_float_absolute_eq!(result.extra_sandwiches(Ingredient::Meat).unwrap(), 2.4, 1e-9);
}

#[test]
fn test_deli_leftovers_in_native_units() {
    let result = compute_sandwich_order(
        &deli_order(),
        CalculationTarget::Count(100),
        &RecipeConstants::default(),
    )
    .unwrap();

    // Servings-rated bread has no native unit to report
    assert_eq!(result.leftovers.len(), 2);
    let meat = &result.leftovers[0];
    assert_eq!(meat.ingredient, Ingredient::Meat);
    assert_eq!(meat.unit, "oz");
    assert_float_absolute_eq!(meat.amount, 6.0, 1e-9);

    let cheese = &result.leftovers[1];
    assert_eq!(cheese.unit, "slices");
    assert_float_absolute_eq!(cheese.amount, 20.0, 1e-9);
}

#[test]
fn test_pbj_count_mode() {
    let result = compute_sandwich_order(
        &pbj_order(),
        CalculationTarget::Count(60),
        &RecipeConstants::default(),
    )
    .unwrap();

    assert_eq!(result.packages(Ingredient::PeanutButter), Some(3));
    assert_eq!(result.packages(Ingredient::Jelly), Some(2));
    assert_eq!(result.packages(Ingredient::Bread), Some(6));
    assert_float_absolute_eq!(result.total_cost, 27.50, 1e-9);
    assert_float_absolute_eq!(result.cost_per_sandwich, 27.50 / 60.0, 1e-9);
}

#[test]
fn test_unsized_pbj_uses_recipe_defaults() {
    let order = SandwichOrder::Pbj {
        peanut_butter: Package::priced("Peanut Butter", 3.50),
        jelly: Package::priced("Grape Jelly", 2.50),
        bread: Package::priced("White", 2.00),
    };
    let result =
        compute_sandwich_order(&order, CalculationTarget::Count(60), &RecipeConstants::default())
            .unwrap();
    assert_float_absolute_eq!(result.total_cost, 27.50, 1e-9);
}

#[test]
fn test_pbj_budget_mode() {
    let result = compute_sandwich_order(
        &pbj_order(),
        CalculationTarget::Budget(50.0),
        &RecipeConstants::default(),
    )
    .unwrap();

    // The continuous estimate is 118; rounding up packages forces it down to 110
    assert_eq!(result.sandwich_count, 110);
    assert_eq!(result.packages(Ingredient::PeanutButter), Some(5));
    assert_eq!(result.packages(Ingredient::Jelly), Some(4));
    assert_eq!(result.packages(Ingredient::Bread), Some(11));
    assert_float_absolute_eq!(result.total_cost, 49.50, 1e-9);
    assert_float_absolute_eq!(result.remaining_budget.unwrap(), 0.50, 1e-9);
    assert!(!result.is_budget_exhausted());
}

#[test]
fn test_tiny_budget_is_a_warning_not_an_error() {
    let result = compute_sandwich_order(
        &pbj_order(),
        CalculationTarget::Budget(1.0),
        &RecipeConstants::default(),
    )
    .unwrap();

    assert_eq!(result.sandwich_count, 0);
    assert_eq!(result.warnings, vec![OrderWarning::InsufficientBudget]);
    assert_float_absolute_eq!(result.total_cost, 0.0, 1e-9);
    assert_float_absolute_eq!(result.cost_per_sandwich, 0.0, 1e-9);
    assert_float_absolute_eq!(result.remaining_budget.unwrap(), 1.0, 1e-9);
}

#[test]
fn test_invalid_targets_rejected() {
    let recipe = RecipeConstants::default();
    for target in [
        CalculationTarget::Count(0),
        CalculationTarget::Budget(0.0),
        CalculationTarget::Budget(-5.0),
        CalculationTarget::Budget(f64::NAN),
    ] {
        let err = compute_sandwich_order(&pbj_order(), target, &recipe).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTarget(_)), "{:?}", target);
    }
}

#[test]
fn test_invalid_package_facts_rejected() {
    let recipe = RecipeConstants::default();

    let missing_price: Package = serde_json::from_str(r#"{"weightOz": 16}"#).unwrap();
    let order = SandwichOrder::Deli {
        meat: missing_price,
        cheese: Package::by_slices("American", 44, 4.99),
        bread: Package::by_servings("White", 10.0, 3.28),
    };
    let err = compute_sandwich_order(&order, CalculationTarget::Count(10), &recipe).unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidPackageFacts {
            ingredient: Ingredient::Meat,
            ..
        }
    ));

    // One slice cannot make a sandwich at two slices each
    let order = SandwichOrder::Deli {
        meat: Package::by_weight("Turkey", 16.0, 9.97),
        cheese: Package::by_slices("Sample", 1, 0.50),
        bread: Package::by_servings("White", 10.0, 3.28),
    };
    let err = compute_sandwich_order(&order, CalculationTarget::Count(10), &recipe).unwrap_err();
    assert!(matches!(
        err,
        OrderError::InvalidPackageFacts {
            ingredient: Ingredient::Cheese,
            ..
        }
    ));

    // Deli meat has no default size
    let order = SandwichOrder::Deli {
        meat: Package::priced("Turkey", 9.97),
        cheese: Package::by_slices("American", 44, 4.99),
        bread: Package::by_servings("White", 10.0, 3.28),
    };
    assert!(compute_sandwich_order(&order, CalculationTarget::Count(10), &recipe).is_err());
}

#[test]
fn test_zero_yield_rejected_by_compute_order() {
    let yields = vec![PackageYield::new(Ingredient::Bread, "Loaf", 2.0, 0.0)];
    let err = compute_order(CalculationTarget::Count(10), &yields).unwrap_err();
    assert!(matches!(err, OrderError::InvalidPackageFacts { .. }));
    assert!(compute_order(CalculationTarget::Count(10), &[]).is_err());
}

#[test]
fn test_count_mode_never_undersupplies() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let yields = random_yields(&mut rng);
        let count = rng.gen_range(1..1000);
        let result = compute_order(CalculationTarget::Count(count), &yields).unwrap();

        for (line, y) in result.lines.iter().zip(&yields) {
            assert_eq!(line.packages, packages_needed(count as f64, y.yield_per_package));
            assert!(
                line.packages as f64 * y.yield_per_package + 1e-9 >= count as f64,
                "{} packages of {} undersupply {}",
                line.packages,
                y.yield_per_package,
                count
            );
            assert!(line.extra_sandwiches > -1e-9);
        }
        assert!(result.achievable_sandwiches >= count);
    }
}

#[test]
fn test_budget_mode_is_monotonic_and_within_budget() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let yields = random_yields(&mut rng);
        let mut previous = 0;
        for cents in (100..30_000).step_by(250) {
            let budget = cents as f64 / 100.0;
            let result = compute_order(CalculationTarget::Budget(budget), &yields).unwrap();

            assert!(result.total_cost <= budget + 1e-9);
            assert!(result.sandwich_count >= previous);
            assert_float_absolute_eq!(
                result.remaining_budget.unwrap(),
                budget - result.total_cost,
                1e-9
            );
            previous = result.sandwich_count;
        }
    }
}

#[test]
fn test_budget_result_is_the_largest_affordable_count() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let yields = random_yields(&mut rng);
        let budget = rng.gen_range(500..20_000) as f64 / 100.0;
        let result = compute_order(CalculationTarget::Budget(budget), &yields).unwrap();

        let next = compute_order(CalculationTarget::Count(result.sandwich_count + 1), &yields)
            .unwrap();
        assert!(next.total_cost > budget);
    }
}

#[test]
fn test_identical_inputs_give_identical_results() {
    let recipe = RecipeConstants::default();
    let first =
        compute_sandwich_order(&deli_order(), CalculationTarget::Budget(300.0), &recipe).unwrap();
    let second =
        compute_sandwich_order(&deli_order(), CalculationTarget::Budget(300.0), &recipe).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_enormous_yields_still_cover_the_order() {
    let yields = vec![
        PackageYield::new(Ingredient::PeanutButter, "Drum", 40.0, 3.0e9),
        PackageYield::new(Ingredient::Jelly, "Jar", 2.5, 30.0),
        PackageYield::new(Ingredient::Bread, "Loaf", 2.0, 10.0),
    ];
    let result = compute_order(CalculationTarget::Count(1), &yields).unwrap();
    assert_eq!(result.packages(Ingredient::PeanutButter), Some(1));
    assert_float_absolute_eq!(result.total_cost, 44.5, 1e-9);

    // One drum alone is over budget
    let result = compute_order(CalculationTarget::Budget(30.0), &yields).unwrap();
    assert_eq!(result.sandwich_count, 0);
    assert!(result.is_budget_exhausted());
}
