use std::path::Path;

use crate::error::Result;
use crate::models::OrderResult;

/// Write an order as a CSV shopping list, one row per ingredient plus a total.
pub fn write_shopping_list(result: &OrderResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "ingredient",
        "product",
        "packages",
        "unit_price",
        "cost",
        "sandwiches_per_package",
        "extra_sandwiches",
    ])?;

    for line in &result.lines {
        wtr.write_record([
            line.ingredient.key().to_string(),
            line.product.clone(),
            line.packages.to_string(),
            format!("{:.2}", line.price),
            format!("{:.2}", line.cost),
            format!("{:.2}", line.yield_per_package),
            format!("{:.2}", line.extra_sandwiches),
        ])?;
    }

    wtr.write_record([
        "total".to_string(),
        format!("{} sandwiches", result.sandwich_count),
        result.lines.iter().map(|l| l.packages).sum::<u32>().to_string(),
        String::new(),
        format!("{:.2}", result.total_cost),
        String::new(),
        String::new(),
    ])?;

    wtr.flush()?;
    Ok(())
}
