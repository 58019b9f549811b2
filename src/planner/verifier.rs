use tracing::{debug, info};

use crate::models::verification::format_amount;
use crate::models::{
    CheckKind, Ingredient, PackageFacts, PriorResult, SandwichKind, VerificationCheck,
    VerificationReport,
};
use crate::planner::calculations::{packages_needed, snap_to_integer};
use crate::planner::constants::{COST_TOLERANCE_PER_SANDWICH, cost_band};

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn package_count_check(
    ingredient: Ingredient,
    total: f64,
    yield_per_package: f64,
    reported: f64,
) -> VerificationCheck {
    let expected = packages_needed(total, yield_per_package) as f64;
    VerificationCheck {
        check: CheckKind::Packages(ingredient),
        label: format!("{} {}", ingredient.title(), ingredient.unit_noun()),
        reported_value: reported,
        expected_value: Some(expected),
        pass: reported == expected,
        formula: format!(
            "ceil({} sandwiches / {} per pkg) = {}",
            format_amount(total),
            format_amount(yield_per_package),
            format_amount(expected)
        ),
    }
}

fn cost_band_check(kind: SandwichKind, cost_per_sandwich: f64) -> VerificationCheck {
    let (low, high) = cost_band(kind);
    VerificationCheck {
        check: CheckKind::CostPerSandwich,
        label: "Cost per sandwich reasonable".to_string(),
        reported_value: cost_per_sandwich,
        expected_value: None,
        pass: (low..=high).contains(&cost_per_sandwich),
        formula: format!(
            "${:.2} should be between ${:.2} and ${:.2}",
            cost_per_sandwich, low, high
        ),
    }
}

/// Reported total against the sum of reported item costs.
///
/// Skipped unless the total and every recipe ingredient's cost are present.
fn cost_consistency_check(
    prior: &PriorResult,
    kind: SandwichKind,
    total_sandwiches: f64,
) -> Option<VerificationCheck> {
    let total_cost = prior.total_cost?;
    let costs: Vec<f64> = kind
        .ingredients()
        .into_iter()
        .map(|i| prior.quantities.cost(i))
        .collect::<Option<Vec<f64>>>()?;
    let bag_cost = prior.quantities.bag_cost();
    let summed: f64 = costs.iter().sum::<f64>() + bag_cost;

    let terms: Vec<String> = costs
        .iter()
        .chain(std::iter::once(&bag_cost))
        .map(|c| format!("${:.2}", c))
        .collect();

    Some(VerificationCheck {
        check: CheckKind::CostConsistency,
        label: "Total cost matches item sum".to_string(),
        reported_value: round_cents(total_cost),
        expected_value: Some(round_cents(summed)),
        pass: (total_cost - summed).abs() < COST_TOLERANCE_PER_SANDWICH * total_sandwiches,
        formula: format!("{} = ${:.2}", terms.join(" + "), summed),
    })
}

fn coverage_check(
    ingredient: Ingredient,
    total: f64,
    yield_per_package: f64,
    reported: f64,
) -> VerificationCheck {
    // Fractional counts are taken as reported
    let covers = snap_to_integer(reported.max(0.0) * yield_per_package).floor();
    VerificationCheck {
        check: CheckKind::Coverage(ingredient),
        label: format!("{} covers target", ingredient.title()),
        reported_value: covers,
        expected_value: Some(total),
        pass: covers >= total,
        formula: format!(
            "{} pkgs × {} = {} sandwiches (need {})",
            format_amount(reported),
            format_amount(yield_per_package),
            format_amount(covers),
            format_amount(total)
        ),
    }
}

/// Cross-check a caller-reported result against independent recomputation.
///
/// Every quantity present in `prior` with a matching fact yields one check.
/// The verifier never fails: missing data skips individual checks, and a
/// missing prior result or sandwich count skips the whole report.
pub fn verify(
    prior: Option<&PriorResult>,
    facts: &PackageFacts,
    kind: SandwichKind,
) -> VerificationReport {
    let Some(prior) = prior else {
        return VerificationReport::skipped("No prior results provided for verification");
    };
    let total = match prior.total_sandwiches {
        Some(t) if t.is_finite() && t > 0.0 => t,
        _ => return VerificationReport::skipped("Invalid sandwich count"),
    };

    let mut checks = Vec::new();
    let ingredients = kind.ingredients();

    for ingredient in ingredients {
        if let (Some(y), Some(reported)) = (
            facts.yield_for(ingredient),
            prior.quantities.count(ingredient),
        ) {
            checks.push(package_count_check(ingredient, total, y, reported));
        }
    }

    if let Some(cost_per_sandwich) = prior.cost_per_sandwich {
        checks.push(cost_band_check(kind, cost_per_sandwich));
    }

    if let Some(check) = cost_consistency_check(prior, kind, total) {
        checks.push(check);
    }

    for ingredient in ingredients {
        if let (Some(y), Some(reported)) = (
            facts.yield_for(ingredient),
            prior.quantities.count(ingredient),
        ) {
            checks.push(coverage_check(ingredient, total, y, reported));
        }
    }

    let report = VerificationReport::from_checks(checks);
    if report.is_fail() {
        info!(
            failed = report.failed_checks,
            total = report.total_checks,
            "verification found discrepancies"
        );
    } else {
        debug!(total = report.total_checks, "verification passed");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quantities, ReportedQuantity, VerificationStatus};

    fn deli_facts() -> PackageFacts {
        PackageFacts::new()
            .with_yield(Ingredient::Meat, 6.4)
            .with_yield(Ingredient::Cheese, 22.0)
            .with_yield(Ingredient::Bread, 10.0)
    }

    fn deli_prior(meat: f64, cheese: f64, bread: f64) -> PriorResult {
        let mut quantities = Quantities::default();
        quantities.set(Ingredient::Meat, ReportedQuantity::Count(meat));
        quantities.set(Ingredient::Cheese, ReportedQuantity::Count(cheese));
        quantities.set(Ingredient::Bread, ReportedQuantity::Count(bread));
        PriorResult {
            total_sandwiches: Some(100.0),
            quantities,
            ..Default::default()
        }
    }

    #[test]
    fn test_skipped_without_prior() {
        let report = verify(None, &deli_facts(), SandwichKind::Deli);
        assert_eq!(report.status, VerificationStatus::Skipped);
        assert!(report.checks.is_empty());
    }

    #[test]
    fn test_skipped_with_non_positive_count() {
        let mut prior = deli_prior(16.0, 5.0, 10.0);
        prior.total_sandwiches = Some(0.0);
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);
        assert_eq!(report.status, VerificationStatus::Skipped);

        prior.total_sandwiches = None;
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);
        assert_eq!(report.status, VerificationStatus::Skipped);
    }

    #[test]
    fn test_correct_counts_pass() {
        let prior = deli_prior(16.0, 5.0, 10.0);
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);
        assert_eq!(report.status, VerificationStatus::Pass);
        // three package checks plus three coverage checks
        assert_eq!(report.total_checks, 6);
        assert!(report.discrepancies.is_empty());
    }

    #[test]
    fn test_short_meat_count_fails() {
        let prior = deli_prior(15.0, 5.0, 10.0);
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);

        assert_eq!(report.status, VerificationStatus::Fail);
        let meat = report
            .discrepancies
            .iter()
            .find(|d| d.check == CheckKind::Packages(Ingredient::Meat))
            .unwrap();
        assert_eq!(meat.expected_value, Some(16.0));
        assert_eq!(meat.reported_value, 15.0);
        assert_eq!(meat.message, "Expected 16, got 15");

        // 15 x 6.4 = 96 sandwiches, short of 100
        assert!(report
            .discrepancies
            .iter()
            .any(|d| d.check == CheckKind::Coverage(Ingredient::Meat)));
    }

    #[test]
    fn test_over_buying_fails_count_but_covers() {
        let prior = deli_prior(16.0, 6.0, 10.0);
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);

        assert!(report.is_fail());
        assert_eq!(report.failed_checks, 1);
        assert_eq!(
            report.discrepancies[0].check,
            CheckKind::Packages(Ingredient::Cheese)
        );
    }

    #[test]
    fn test_cost_band_by_kind() {
        let mut prior = deli_prior(16.0, 5.0, 10.0);
        prior.cost_per_sandwich = Some(0.45);

        let deli = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);
        assert!(deli.is_fail());
        let band = &deli.discrepancies[0];
        assert_eq!(band.check, CheckKind::CostPerSandwich);
        assert_eq!(band.message, "$0.45 should be between $0.50 and $5.00");

        let pbj = verify(Some(&prior), &PackageFacts::new(), SandwichKind::Pbj);
        assert!(pbj.is_pass());
        assert_eq!(pbj.total_checks, 1);
    }

    #[test]
    fn test_cost_consistency_tolerance_scales() {
        let json = r#"{
            "totalSandwiches": 100,
            "totalCost": 218.50,
            "quantities": {
                "meat": {"count": 16, "cost": 159.52},
                "cheese": {"count": 5, "cost": 24.95},
                "bread": {"count": 10, "cost": 32.80}
            }
        }"#;
        let prior: PriorResult = serde_json::from_str(json).unwrap();
        let report = verify(Some(&prior), &PackageFacts::new(), SandwichKind::Deli);

        // 1.23 off, allowed 0.02 x 100 = 2.00
        let check = &report.checks[0];
        assert_eq!(check.check, CheckKind::CostConsistency);
        assert!(check.pass);
        assert_eq!(check.expected_value, Some(217.27));

        let mut strict = prior.clone();
        strict.total_sandwiches = Some(10.0);
        let report = verify(Some(&strict), &PackageFacts::new(), SandwichKind::Deli);
        assert!(report.is_fail());
    }

    #[test]
    fn test_cost_consistency_needs_every_cost() {
        let json = r#"{
            "totalSandwiches": 100,
            "totalCost": 500.0,
            "quantities": {"meat": {"count": 16, "cost": 159.52}}
        }"#;
        let prior: PriorResult = serde_json::from_str(json).unwrap();
        let report = verify(Some(&prior), &PackageFacts::new(), SandwichKind::Deli);
        assert_eq!(report.total_checks, 0);
        assert!(report.is_pass());
    }

    #[test]
    fn test_fractional_count_coverage_uses_full_product() {
        let prior = deli_prior(15.9, 5.0, 10.0);
        let report = verify(Some(&prior), &deli_facts(), SandwichKind::Deli);

        let coverage = report
            .checks
            .iter()
            .find(|c| c.check == CheckKind::Coverage(Ingredient::Meat))
            .unwrap();
        // 15.9 x 6.4 = 101.76
        assert_eq!(coverage.reported_value, 101.0);
        assert!(coverage.pass);

        // The count itself still disagrees with ceil(100 / 6.4)
        assert_eq!(report.failed_checks, 1);
        assert_eq!(report.discrepancies[0].check, CheckKind::Packages(Ingredient::Meat));
    }
}
