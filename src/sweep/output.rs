use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::sweep::evaluation::EvaluationResult;

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write all results to a CSV file.
pub fn write_csv(results: &[EvaluationResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "kind",
        "first",
        "second",
        "bread",
        "avg_cost_per_sandwich",
        "avg_waste",
    ])?;

    for (i, result) in results.iter().enumerate() {
        let [first, second, bread] = &result.combo.ids;
        wtr.write_record([
            (i + 1).to_string(),
            result.combo.kind.label().to_string(),
            first.clone(),
            second.clone(),
            bread.clone(),
            format!("{:.4}", result.avg_cost_per_sandwich),
            format!("{:.2}", result.avg_waste),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the best result to a JSON file with rounded floats.
pub fn write_best_json(best: &EvaluationResult, path: &Path) -> Result<()> {
    let ingredients = best.combo.kind.ingredients();
    let products: serde_json::Map<String, serde_json::Value> = ingredients
        .iter()
        .zip(&best.combo.ids)
        .map(|(i, id)| (i.key().to_string(), serde_json::Value::from(id.as_str())))
        .collect();

    let json = serde_json::json!({
        "sandwichType": best.combo.kind,
        "products": products,
        "metrics": {
            "avgCostPerSandwich": truncate(best.avg_cost_per_sandwich, 4),
            "avgWaste": truncate(best.avg_waste, 2),
        },
        "perTarget": best.per_target.iter().map(|r| {
            serde_json::json!({
                "target": r.target,
                "totalCost": truncate(r.total_cost, 2),
                "costPerSandwich": truncate(r.cost_per_sandwich, 4),
                "waste": truncate(r.waste, 2),
            })
        }).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print top-k results to stdout.
pub fn print_topk(results: &[EvaluationResult], k: usize) {
    println!(
        "\n=== Top {} Combinations (by cost per sandwich) ===\n",
        k.min(results.len())
    );

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: ${:.3}/sandwich  waste={:.1}",
            i + 1,
            result.avg_cost_per_sandwich,
            result.avg_waste
        );
        println!("    {}", result.combo.display());
        for r in &result.per_target {
            println!(
                "      {:>4} sandwiches: ${:>8.2}  (${:.3} each)",
                r.target, r.total_cost, r.cost_per_sandwich
            );
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SandwichKind;
    use crate::sweep::evaluation::{ProductCombo, TargetResult};

    fn sample() -> EvaluationResult {
        EvaluationResult {
            combo: ProductCombo {
                kind: SandwichKind::Pbj,
                ids: ["pb".to_string(), "jelly".to_string(), "loaf".to_string()],
            },
            avg_cost_per_sandwich: 0.423333,
            avg_waste: 12.5,
            per_target: vec![TargetResult {
                target: 140,
                total_cost: 61.5,
                cost_per_sandwich: 0.439285,
                waste: 12.5,
            }],
        }
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        write_csv(&[sample(), sample()], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[0][2], "pb");
        assert_eq!(&rows[0][5], "0.4233");
    }

    #[test]
    fn test_best_json_names_products_by_ingredient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        write_best_json(&sample(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sandwichType"], "pbj");
        assert_eq!(value["products"]["peanutButter"], "pb");
        assert_eq!(value["metrics"]["avgCostPerSandwich"], 0.4233);
    }
}
