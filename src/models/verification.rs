use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::models::order::{OrderResult, SandwichKind};
use crate::models::package::Ingredient;

/// A reported package quantity, either bare or with its cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportedQuantity {
    Count(f64),
    Detailed {
        #[serde(default)]
        count: Option<f64>,
        #[serde(default)]
        cost: Option<f64>,
    },
}

impl ReportedQuantity {
    pub fn count(&self) -> Option<f64> {
        match self {
            ReportedQuantity::Count(n) => Some(*n),
            ReportedQuantity::Detailed { count, .. } => *count,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            ReportedQuantity::Count(_) => None,
            ReportedQuantity::Detailed { cost, .. } => *cost,
        }
    }
}

/// Package quantities as a caller reported them.
///
/// Costs may sit next to the count (`{"meat": {"count": 16, "cost": 159.52}}`)
/// or in flat fields (`"meatCost": 159.52`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meat: Option<ReportedQuantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheese: Option<ReportedQuantity>,
    #[serde(default, alias = "breadLoaves", skip_serializing_if = "Option::is_none")]
    pub bread: Option<ReportedQuantity>,
    #[serde(default, alias = "pbJars", skip_serializing_if = "Option::is_none")]
    pub peanut_butter: Option<ReportedQuantity>,
    #[serde(default, alias = "jellyJars", skip_serializing_if = "Option::is_none")]
    pub jelly: Option<ReportedQuantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bags: Option<ReportedQuantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meat_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheese_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bread_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peanut_butter_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jelly_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag_cost: Option<f64>,
}

impl Quantities {
    pub fn get(&self, ingredient: Ingredient) -> Option<&ReportedQuantity> {
        match ingredient {
            Ingredient::Meat => self.meat.as_ref(),
            Ingredient::Cheese => self.cheese.as_ref(),
            Ingredient::Bread => self.bread.as_ref(),
            Ingredient::PeanutButter => self.peanut_butter.as_ref(),
            Ingredient::Jelly => self.jelly.as_ref(),
        }
    }

    fn flat_cost(&self, ingredient: Ingredient) -> Option<f64> {
        match ingredient {
            Ingredient::Meat => self.meat_cost,
            Ingredient::Cheese => self.cheese_cost,
            Ingredient::Bread => self.bread_cost,
            Ingredient::PeanutButter => self.peanut_butter_cost,
            Ingredient::Jelly => self.jelly_cost,
        }
    }

    pub fn count(&self, ingredient: Ingredient) -> Option<f64> {
        self.get(ingredient).and_then(ReportedQuantity::count)
    }

    pub fn cost(&self, ingredient: Ingredient) -> Option<f64> {
        self.get(ingredient)
            .and_then(ReportedQuantity::cost)
            .or_else(|| self.flat_cost(ingredient))
    }

    /// Bag cost, zero when not reported.
    pub fn bag_cost(&self) -> f64 {
        self.bags
            .as_ref()
            .and_then(ReportedQuantity::cost)
            .or(self.bag_cost)
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, ingredient: Ingredient, quantity: ReportedQuantity) {
        let slot = match ingredient {
            Ingredient::Meat => &mut self.meat,
            Ingredient::Cheese => &mut self.cheese,
            Ingredient::Bread => &mut self.bread,
            Ingredient::PeanutButter => &mut self.peanut_butter,
            Ingredient::Jelly => &mut self.jelly,
        };
        *slot = Some(quantity);
    }
}

/// The per-package facts a caller used for its own math.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MathDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meat_sandwiches_per_pkg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheese_sandwiches_per_pkg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bread_sandwiches_per_pkg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_servings_per_jar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jelly_servings_per_jar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_tbsp_per_jar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_tbsp_per_sandwich: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jelly_tbsp_per_jar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jelly_tbsp_per_sandwich: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_bread_slices_per_loaf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bread_slices_per_sandwich: Option<f64>,
}

/// A previously computed result submitted for cross-checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorResult {
    #[serde(default)]
    pub total_sandwiches: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub cost_per_sandwich: Option<f64>,
    #[serde(default)]
    pub quantities: Quantities,
    #[serde(default)]
    pub math_details: MathDetails,
}

impl From<&OrderResult> for PriorResult {
    fn from(result: &OrderResult) -> Self {
        let mut quantities = Quantities::default();
        for line in &result.lines {
            quantities.set(
                line.ingredient,
                ReportedQuantity::Detailed {
                    count: Some(line.packages as f64),
                    cost: Some(line.cost),
                },
            );
        }

        PriorResult {
            total_sandwiches: Some(result.sandwich_count as f64),
            total_cost: Some(result.total_cost),
            cost_per_sandwich: Some(result.cost_per_sandwich),
            quantities,
            math_details: MathDetails::default(),
        }
    }
}

/// Envelope accepted by the verification command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub sandwich_type: SandwichKind,
    #[serde(default, alias = "priorResult")]
    pub frontend_results: Option<PriorResult>,
}

/// Sandwiches per package for each ingredient, as the verifier sees them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFacts {
    yields: BTreeMap<Ingredient, f64>,
}

impl PackageFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_yield(mut self, ingredient: Ingredient, yield_per_package: f64) -> Self {
        self.insert(ingredient, yield_per_package);
        self
    }

    /// Records a yield, ignoring values that cannot divide a sandwich count.
    pub fn insert(&mut self, ingredient: Ingredient, yield_per_package: f64) {
        if yield_per_package.is_finite() && yield_per_package > 0.0 {
            self.yields.insert(ingredient, yield_per_package);
        }
    }

    pub fn yield_for(&self, ingredient: Ingredient) -> Option<f64> {
        self.yields.get(&ingredient).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.yields.is_empty()
    }

    /// Facts taken from a calculator result.
    pub fn from_order(result: &OrderResult) -> Self {
        let mut facts = Self::new();
        for line in &result.lines {
            facts.insert(line.ingredient, line.yield_per_package);
        }
        facts
    }

    /// Facts reconstructed from the details a caller reported.
    ///
    /// Spreads and bread may be described by volume or slices; those are
    /// floored to whole sandwiches.
    pub fn from_math_details(kind: SandwichKind, md: &MathDetails) -> Self {
        let mut facts = Self::new();
        let per_unit = |total: Option<f64>, per: Option<f64>| match (total, per) {
            (Some(t), Some(p)) if p > 0.0 => Some((t / p).floor()),
            _ => None,
        };

        let bread = md
            .bread_sandwiches_per_pkg
            .or_else(|| per_unit(md.usable_bread_slices_per_loaf, md.bread_slices_per_sandwich));

        match kind {
            SandwichKind::Deli => {
                if let Some(y) = md.meat_sandwiches_per_pkg {
                    facts.insert(Ingredient::Meat, y);
                }
                if let Some(y) = md.cheese_sandwiches_per_pkg {
                    facts.insert(Ingredient::Cheese, y);
                }
            }
            SandwichKind::Pbj => {
                let pb = md
                    .pb_servings_per_jar
                    .or_else(|| per_unit(md.pb_tbsp_per_jar, md.pb_tbsp_per_sandwich));
                let jelly = md
                    .jelly_servings_per_jar
                    .or_else(|| per_unit(md.jelly_tbsp_per_jar, md.jelly_tbsp_per_sandwich));
                if let Some(y) = pb {
                    facts.insert(Ingredient::PeanutButter, y);
                }
                if let Some(y) = jelly {
                    facts.insert(Ingredient::Jelly, y);
                }
            }
        }
        if let Some(y) = bread {
            facts.insert(Ingredient::Bread, y);
        }

        facts
    }

    /// Fills ingredients missing here from `other`.
    pub fn or_from(mut self, other: &PackageFacts) -> Self {
        for (ingredient, y) in &other.yields {
            self.yields.entry(*ingredient).or_insert(*y);
        }
        self
    }
}

/// What a single verification check recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Packages(Ingredient),
    CostPerSandwich,
    CostConsistency,
    Coverage(Ingredient),
}

impl CheckKind {
    /// Stable identifier, e.g. `meatPackages` or `costConsistency`.
    pub fn id(&self) -> String {
        match self {
            CheckKind::Packages(i) => format!("{}Packages", i.key()),
            CheckKind::CostPerSandwich => "costPerSandwich".to_string(),
            CheckKind::CostConsistency => "costConsistency".to_string(),
            CheckKind::Coverage(i) => format!("{}Coverage", i.key()),
        }
    }
}

impl Serialize for CheckKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCheck {
    pub check: CheckKind,
    pub label: String,
    pub reported_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    pub pass: bool,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    pub check: CheckKind,
    pub label: String,
    pub message: String,
    pub reported_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,
    pub checks: Vec<VerificationCheck>,
    pub discrepancies: Vec<Discrepancy>,
}

impl VerificationReport {
    pub fn skipped(reason: &str) -> Self {
        Self {
            status: VerificationStatus::Skipped,
            reason: Some(reason.to_string()),
            total_checks: 0,
            passed_checks: 0,
            failed_checks: 0,
            checks: Vec::new(),
            discrepancies: Vec::new(),
        }
    }

    /// Aggregates checks; the report passes only if every check does.
    pub fn from_checks(checks: Vec<VerificationCheck>) -> Self {
        let discrepancies: Vec<Discrepancy> = checks
            .iter()
            .filter(|c| !c.pass)
            .map(|c| Discrepancy {
                check: c.check,
                label: c.label.clone(),
                message: match c.expected_value {
                    Some(expected) => format!(
                        "Expected {}, got {}",
                        format_amount(expected),
                        format_amount(c.reported_value)
                    ),
                    None => c.formula.clone(),
                },
                reported_value: c.reported_value,
                expected_value: c.expected_value,
            })
            .collect();

        let failed = discrepancies.len();
        Self {
            status: if failed == 0 {
                VerificationStatus::Pass
            } else {
                VerificationStatus::Fail
            },
            reason: None,
            total_checks: checks.len(),
            passed_checks: checks.len() - failed,
            failed_checks: failed,
            checks,
            discrepancies,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == VerificationStatus::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == VerificationStatus::Fail
    }
}

/// Whole numbers print bare, anything else with two decimals.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
