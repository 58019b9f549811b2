use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::catalog::{Catalog, FUZZY_HINT_SCORE, Product};
use crate::error::{OrderError, Result};
use crate::models::{
    CalculationTarget, Ingredient, OrderRequest, Package, SandwichKind, SandwichOrder,
};

fn parse_number<T: std::str::FromStr>(input: &str) -> Result<T> {
    input
        .trim()
        .trim_start_matches('$')
        .parse()
        .map_err(|_| OrderError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for deli or PB&J.
pub fn prompt_kind() -> Result<SandwichKind> {
    let selection = Select::new()
        .with_prompt("What are you making?")
        .items(&["Deli sandwiches", "PB&J sandwiches"])
        .default(0)
        .interact()?;

    Ok(if selection == 0 {
        SandwichKind::Deli
    } else {
        SandwichKind::Pbj
    })
}

/// Prompt for a sandwich count or a budget.
pub fn prompt_target() -> Result<CalculationTarget> {
    let selection = Select::new()
        .with_prompt("Plan by")
        .items(&["Number of sandwiches", "Budget"])
        .default(0)
        .interact()?;

    if selection == 0 {
        let input: String = Input::new()
            .with_prompt("How many sandwiches?")
            .default("100".to_string())
            .interact_text()?;
        Ok(CalculationTarget::Count(parse_number(&input)?))
    } else {
        let input: String = Input::new()
            .with_prompt("Budget in dollars?")
            .default("50".to_string())
            .interact_text()?;
        Ok(CalculationTarget::Budget(parse_number(&input)?))
    }
}

/// Search a category by name, confirming fuzzy matches.
fn search_product<'a>(products: &[&'a Product]) -> Result<Option<&'a Product>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Search (or press Enter to go back)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Ok(None);
        }

        // Exact id or name first
        if let Some(product) = products
            .iter()
            .find(|p| p.key() == input || p.name().to_lowercase() == input)
            .copied()
        {
            return Ok(Some(product));
        }

        let mut candidates: Vec<(&Product, f64)> = products
            .iter()
            .map(|p| {
                let score = jaro_winkler(&p.name().to_lowercase(), &input)
                    .max(jaro_winkler(&p.key(), &input));
                (*p, score)
            })
            .filter(|(_, score)| *score > FUZZY_HINT_SCORE)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        match candidates.len() {
            0 => println!("No matching product found for '{}'", input),
            1 => {
                let product = candidates[0].0;
                if prompt_yes_no(&format!("Did you mean '{}'?", product.name()), true)? {
                    return Ok(Some(product));
                }
            }
            _ => {
                let mut options: Vec<String> = candidates
                    .iter()
                    .take(5)
                    .map(|(p, _)| p.name().to_string())
                    .collect();
                let shown = options.len();
                options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;
                if selection < shown {
                    return Ok(Some(candidates[selection].0));
                }
            }
        }
    }
}

/// Prompt for a custom package's price and size.
fn prompt_custom_package(ingredient: Ingredient) -> Result<Package> {
    let name: String = Input::new()
        .with_prompt("Product name")
        .default(format!("Custom {}", ingredient))
        .interact_text()?;
    let price: String = Input::new().with_prompt("Price").interact_text()?;
    let price: f64 = parse_number(&price)?;

    let package = match ingredient {
        Ingredient::Meat => {
            let oz: String = Input::new().with_prompt("Package weight (oz)").interact_text()?;
            Package::by_weight(&name, parse_number(&oz)?, price)
        }
        Ingredient::Cheese => {
            let slices: String = Input::new().with_prompt("Slices per package").interact_text()?;
            Package::by_slices(&name, parse_number(&slices)?, price)
        }
        Ingredient::Bread | Ingredient::PeanutButter | Ingredient::Jelly => {
            let servings: String = Input::new()
                .with_prompt("Sandwiches per package (Enter for default)")
                .allow_empty(true)
                .interact_text()?;
            if servings.trim().is_empty() {
                Package::priced(&name, price)
            } else {
                Package::by_servings(&name, parse_number(&servings)?, price)
            }
        }
    };
    Ok(package)
}

/// Prompt for one ingredient: pick from the catalog, search, or enter a custom package.
pub fn prompt_package(catalog: &Catalog, ingredient: Ingredient) -> Result<Package> {
    let products = catalog.by_category(ingredient);

    loop {
        let mut options: Vec<String> = products
            .iter()
            .map(|p| match p.package.price {
                Some(price) => format!("{} (${:.2})", p.name(), price),
                None => p.name().to_string(),
            })
            .collect();
        options.push("Search by name...".to_string());
        options.push("Custom package...".to_string());

        let selection = Select::new()
            .with_prompt(format!("Choose {}", ingredient))
            .items(&options)
            .default(0)
            .interact()?;

        if selection < products.len() {
            return Ok(products[selection].package.clone());
        }
        if selection == products.len() {
            if let Some(product) = search_product(&products)? {
                println!("Selected: {}", product.name());
                return Ok(product.package.clone());
            }
            continue;
        }
        return prompt_custom_package(ingredient);
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a full order request interactively.
pub fn collect_order_request(catalog: &Catalog) -> Result<OrderRequest> {
    let kind = prompt_kind()?;
    let [first, second, bread] = kind.ingredients();
    let packages = [
        prompt_package(catalog, first)?,
        prompt_package(catalog, second)?,
        prompt_package(catalog, bread)?,
    ];
    let target = prompt_target()?;

    Ok(OrderRequest {
        order: SandwichOrder::from_packages(kind, packages),
        target,
    })
}
