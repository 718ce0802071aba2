use fuel_dash::api::{DashboardConfig, DashboardEngine};
use fuel_dash::ingest::{ProductSelection, load_dataset};
use fuel_dash::interaction::FilterChange;
use fuel_dash::telemetry;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "usage: dashboard_snapshot --input <csv> [--config <json>] [--product <name> | --most-common-product] [--year <yyyy>] [--region <name>] [--output <path>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    product: Option<ProductSelection>,
    year: Option<String>,
    region: Option<String>,
    output: Option<PathBuf>,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };
    if let Some(product) = args.product {
        config.ingest = config.ingest.with_product(product);
    }

    let loaded = load_dataset(&args.input, &config.ingest).map_err(|err| err.to_string())?;
    if loaded.report.rows_skipped > 0 {
        eprintln!(
            "skipped {} of {} `{}` rows",
            loaded.report.rows_skipped, loaded.report.rows_read, loaded.report.product
        );
    }

    let mut engine =
        DashboardEngine::new(Arc::new(loaded.store), config).map_err(|err| err.to_string())?;

    let mut changes = Vec::new();
    if let Some(year) = args.year {
        changes.push(FilterChange::Year(year));
    }
    if let Some(region) = args.region {
        changes.push(FilterChange::Region(region));
    }
    if !changes.is_empty() {
        engine
            .apply_filter(FilterChange::Batch(changes))
            .map_err(|err| err.to_string())?;
    }

    let json = engine
        .snapshot_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);

    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut product = None::<ProductSelection>;
    let mut year = None::<String>;
    let mut region = None::<String>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--product" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --product".to_owned())?;
                product = Some(ProductSelection::Named(value));
            }
            "--most-common-product" => product = Some(ProductSelection::MostCommon),
            "--year" => {
                year = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --year".to_owned())?,
                );
            }
            "--region" => {
                region = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --region".to_owned())?,
                );
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        config,
        product,
        year,
        region,
        output,
    })
}
