use anyhow::{Context, Result};
use crossterm::style::Stylize;
use launch_dash::config::config::Config;
use launch_dash::dashboard::Dashboard;
use launch_dash::launch::LaunchDataset;
use launch_dash::utils::logging::init_tracing;
use launch_dash::view::{PayloadRange, SiteFilter};
use std::path::PathBuf;
use std::sync::Arc;

mod table_display;

use table_display::{display_pie, display_scatter};

fn print_help() {
    println!("{}", "launch-report - SpaceX launch records summary".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  launch-report [OPTIONS] [FILE.csv]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Config file to use", "--config <PATH>".green());
    println!("  {}    - Launch site, or ALL (default)", "--site <SITE>".green());
    println!("  {}       - Lower payload bound in kg", "--min <KG>".green());
    println!("  {}       - Upper payload bound in kg", "--max <KG>".green());
    println!("  {}           - Print Plotly figure JSON", "--json".green());
    println!(
        "  {} - Write a commented config to the default location",
        "--generate-config".green()
    );
    println!("  {}           - Show this help", "--help".green());
    println!();
}

/// Value following a `--flag`
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(String::as_str)
}

fn parse_bound(args: &[String], flag: &str) -> Result<Option<f64>> {
    flag_value(args, flag)
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("{} expects a number, got {:?}", flag, v))
        })
        .transpose()
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {:?}", parent))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {:?}", path))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config_path = flag_value(args, "--config").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;
    init_tracing(&config.logging.filter);

    // A trailing .csv argument wins over the configured path
    if let Some(csv) = args.iter().skip(1).find(|a| a.ends_with(".csv")) {
        config.data.csv_path = PathBuf::from(csv);
    }

    let dataset = Arc::new(LaunchDataset::load_csv(
        &config.data.csv_path,
        &config.data.columns,
    )?);
    let dashboard = Dashboard::new(Arc::clone(&dataset), config.dashboard.clone());

    let site = SiteFilter::parse(flag_value(args, "--site").unwrap_or_default());
    let defaults = dashboard.default_range();
    let range = PayloadRange::new(
        parse_bound(args, "--min")?.unwrap_or(defaults.low),
        parse_bound(args, "--max")?.unwrap_or(defaults.high),
    );

    let pie = dashboard.success_pie(&site);
    let scatter = dashboard.payload_scatter(&site, range);

    if args.iter().any(|a| a == "--json") {
        let output = serde_json::json!({
            "success_pie": pie,
            "payload_scatter": scatter,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{} launches, {} sites, payload range {}",
            dataset.len(),
            dataset.sites().len(),
            range
        )
        .cyan()
    );
    println!();
    display_pie(&pie);
    println!();
    display_scatter(&scatter);

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let result = if args.iter().any(|a| a == "--generate-config") {
        generate_config()
    } else {
        run(&args)
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}
