use std::fs;
use std::path::Path;

use clap::Parser;

use sandwich_order_rs::catalog::{Catalog, load_or_builtin, save_catalog};
use sandwich_order_rs::cli::{CalculateArgs, Cli, Command};
use sandwich_order_rs::error::{OrderError, Result};
use sandwich_order_rs::interface::{
    collect_order_request, display_plan, display_product_list, display_suggestions,
    display_verification, prompt_yes_no, write_shopping_list,
};
use sandwich_order_rs::logging::init_logging;
use sandwich_order_rs::models::{
    Ingredient, PackageFacts, PackageSize, PriorResult, VerificationRequest,
};
use sandwich_order_rs::planner::{plan_order, suggest_quantities, verify};

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a verification ran and failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or_default();

    let catalog = || load_or_builtin(cli.catalog.as_deref());

    match command {
        Command::Calculate(args) => cmd_calculate(&catalog()?, &args),
        Command::Suggest { target, yields } => cmd_suggest(target, &yields),
        Command::Verify { path, json } => cmd_verify(&path, json),
        Command::Products { category } => cmd_products(&catalog()?, category),
        Command::Interactive => cmd_interactive(&catalog()?),
        Command::InitCatalog { path, force } => cmd_init_catalog(&path, force),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Calculate an order from command-line products and flags.
fn cmd_calculate(catalog: &Catalog, args: &CalculateArgs) -> Result<bool> {
    let request = args.to_request(catalog)?;
    let recipe = args.recipe(&catalog.recipe);
    let prior: Option<PriorResult> = args
        .verify
        .as_deref()
        .map(read_json::<PriorResult>)
        .transpose()?;

    let plan = plan_order(&request, &recipe, prior.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan, request.order.kind());
    }

    if let Some(path) = &args.csv {
        write_shopping_list(&plan.calculations, path)?;
        if !args.json {
            println!("Wrote shopping list to {}", path.display());
        }
    }

    Ok(!plan.verification.is_fail())
}

/// Suggest waste-reducing counts for raw package yields.
fn cmd_suggest(target: u32, yields: &[u32]) -> Result<bool> {
    if target == 0 {
        return Err(OrderError::InvalidTarget(
            "sandwich count must be a positive integer".to_string(),
        ));
    }
    let packages: Vec<PackageSize> = yields
        .iter()
        .enumerate()
        .map(|(i, y)| PackageSize::new(&format!("item{}", i + 1), *y))
        .collect();

    display_suggestions(target, &suggest_quantities(target, &packages));
    Ok(true)
}

/// Verify a prior result using only the facts it reported.
fn cmd_verify(path: &Path, json: bool) -> Result<bool> {
    let request: VerificationRequest = read_json(path)?;
    let facts = request
        .frontend_results
        .as_ref()
        .map(|p| PackageFacts::from_math_details(request.sandwich_type, &p.math_details))
        .unwrap_or_default();

    let report = verify(
        request.frontend_results.as_ref(),
        &facts,
        request.sandwich_type,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_verification(&report);
    }
    Ok(!report.is_fail())
}

fn cmd_products(catalog: &Catalog, category: Option<Ingredient>) -> Result<bool> {
    match category {
        Some(c) => display_product_list(&catalog.by_category(c), c.title()),
        None => {
            for c in Ingredient::ALL {
                display_product_list(&catalog.by_category(c), c.title());
            }
        }
    }
    Ok(true)
}

/// Guided calculation; optionally saves a shopping list.
fn cmd_interactive(catalog: &Catalog) -> Result<bool> {
    println!("Loaded {} products", catalog.len());
    println!();

    let request = collect_order_request(catalog)?;
    let plan = plan_order(&request, &catalog.recipe, None)?;
    display_plan(&plan, request.order.kind());

    if prompt_yes_no("Save a CSV shopping list?", false)? {
        let path = Path::new("shopping_list.csv");
        write_shopping_list(&plan.calculations, path)?;
        println!("Wrote shopping list to {}", path.display());
    }
    Ok(true)
}

/// Write the built-in catalog as a starting point for local prices.
fn cmd_init_catalog(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        eprintln!("{} already exists (use --force to overwrite)", path.display());
        return Ok(false);
    }
    let catalog = Catalog::builtin();
    save_catalog(path, &catalog)?;
    println!("Wrote {} products to {}", catalog.len(), path.display());
    Ok(true)
}
