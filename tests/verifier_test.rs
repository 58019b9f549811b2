use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sandwich_order_rs::models::{
    CalculationTarget, Ingredient, PackageFacts, PackageYield, PriorResult, SandwichKind,
    VerificationRequest, VerificationStatus,
};
use sandwich_order_rs::planner::{compute_order, verify};

#[test]
fn test_meat_undercount_reported() {
    let json = r#"{
        "sandwichType": "deli",
        "frontendResults": {
            "totalSandwiches": 100,
            "quantities": {"meat": 15, "cheese": 5, "bread": 10},
            "mathDetails": {
                "meatSandwichesPerPkg": 6.4,
                "cheeseSandwichesPerPkg": 22,
                "breadSandwichesPerPkg": 10
            }
        }
    }"#;
    let request: VerificationRequest = serde_json::from_str(json).unwrap();
    let prior = request.frontend_results.as_ref().unwrap();
    let facts = PackageFacts::from_math_details(request.sandwich_type, &prior.math_details);

    let report = verify(Some(prior), &facts, request.sandwich_type);

    assert_eq!(report.status, VerificationStatus::Fail);
    // Package count and coverage both fail for meat
    assert_eq!(report.failed_checks, 2);
    assert_eq!(report.discrepancies[0].label, "Meat packages");
    assert_eq!(report.discrepancies[0].message, "Expected 16, got 15");
    assert_eq!(report.discrepancies[0].expected_value, Some(16.0));
    assert_eq!(report.discrepancies[1].label, "Meat covers target");
}

#[test]
fn test_report_serializes_check_ids() {
    let json = r#"{
        "sandwichType": "pbj",
        "priorResult": {
            "totalSandwiches": 60,
            "totalCost": 27.5,
            "costPerSandwich": 0.4583,
            "quantities": {
                "pbJars": {"count": 3, "cost": 10.5},
                "jellyJars": {"count": 2, "cost": 5.0},
                "breadLoaves": {"count": 6, "cost": 12.0}
            },
            "mathDetails": {
                "pbServingsPerJar": 25,
                "jellyServingsPerJar": 30,
                "breadSandwichesPerPkg": 10
            }
        }
    }"#;
    let request: VerificationRequest = serde_json::from_str(json).unwrap();
    let prior = request.frontend_results.as_ref().unwrap();
    let facts = PackageFacts::from_math_details(SandwichKind::Pbj, &prior.math_details);

    let report = verify(Some(prior), &facts, SandwichKind::Pbj);
    assert!(report.is_pass(), "{:?}", report.discrepancies);
    // Three package counts, cost band, cost sum, three coverage checks
    assert_eq!(report.total_checks, 8);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["status"], "pass");
    assert_eq!(value["checks"][0]["check"], "peanutButterPackages");
    assert_eq!(value["checks"][4]["check"], "costConsistency");
    assert!(value["discrepancies"].as_array().unwrap().is_empty());
}

#[test]
fn test_missing_prior_or_count_skips() {
    let facts = PackageFacts::new().with_yield(Ingredient::Bread, 10.0);
    assert_eq!(
        verify(None, &facts, SandwichKind::Deli).status,
        VerificationStatus::Skipped
    );

    let request: VerificationRequest =
        serde_json::from_str(r#"{"sandwichType": "deli", "frontendResults": {}}"#).unwrap();
    let report = verify(request.frontend_results.as_ref(), &facts, SandwichKind::Deli);
    assert_eq!(report.status, VerificationStatus::Skipped);
    assert_eq!(report.reason.as_deref(), Some("Invalid sandwich count"));
}

#[test]
fn test_checks_without_facts_are_skipped() {
    let request: VerificationRequest = serde_json::from_str(
        r#"{"sandwichType": "deli", "frontendResults": {"totalSandwiches": 100, "quantities": {"meat": 15}}}"#,
    )
    .unwrap();
    let report = verify(
        request.frontend_results.as_ref(),
        &PackageFacts::new(),
        SandwichKind::Deli,
    );
    assert_eq!(report.total_checks, 0);
    assert_eq!(report.status, VerificationStatus::Pass);
}

#[test]
fn test_round_trip_always_passes() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let kind = if rng.gen_bool(0.5) {
            SandwichKind::Deli
        } else {
            SandwichKind::Pbj
        };
        let yields: Vec<PackageYield> = kind
            .ingredients()
            .into_iter()
            .map(|ingredient| {
                let price = rng.gen_range(100..2000) as f64 / 100.0;
                let yield_per_package = rng.gen_range(20..400) as f64 / 10.0;
                PackageYield::new(ingredient, ingredient.key(), price, yield_per_package)
            })
            .collect();
        let target = if rng.gen_bool(0.5) {
            CalculationTarget::Count(rng.gen_range(1..1000))
        } else {
            CalculationTarget::Budget(rng.gen_range(2_000..50_000) as f64 / 100.0)
        };

        let result = compute_order(target, &yields).unwrap();
        if result.sandwich_count == 0 {
            continue;
        }
        let mut prior = PriorResult::from(&result);
        // Random prices can fall outside the plausible cost band
        prior.cost_per_sandwich = None;

        let report = verify(Some(&prior), &PackageFacts::from_order(&result), kind);
        assert_eq!(
            report.status,
            VerificationStatus::Pass,
            "{:?} {:?}",
            target,
            report.discrepancies
        );
        assert!(report.discrepancies.is_empty());
        assert_eq!(report.total_checks, 7);
    }
}
