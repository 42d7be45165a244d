use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::{env, fs, process::exit};
use tarifador::{
    addons::{AddonItem, CostBreakdown},
    ingest::{load_rate_table, BlockLayout},
    pricing::{quote, ShipmentSpec},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Optional addon-list file: `{"surcharges": [...], "taxes": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct AddonsFile {
    #[serde(default)]
    surcharges: Vec<AddonItem>,
    #[serde(default)]
    taxes: Vec<AddonItem>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) parse args ───────────────────────────────────────────────
    let args: Vec<String> = env::args().collect();
    if args.len() < 5 || args.len() > 6 {
        eprintln!(
            "Usage: {} <TARIFF_CSV> <ZIP> <WEIGHT_KG> <HxWxD_CM> [ADDONS_JSON]",
            args[0]
        );
        exit(1);
    }
    let (tariff_path, zip) = (&args[1], &args[2]);
    let weight_kg: f64 = args[3]
        .parse()
        .with_context(|| format!("bad weight {:?}", args[3]))?;
    let (height_cm, width_cm, depth_cm) = parse_dims(&args[4])?;

    // ─── 3) ingest the tariff export ─────────────────────────────────
    let table = load_rate_table(tariff_path, &BlockLayout::andreani())?;
    info!(zips = table.len(), "tariff ingested");

    // ─── 4) quote ────────────────────────────────────────────────────
    let spec = ShipmentSpec {
        height_cm,
        width_cm,
        depth_cm,
        weight_kg,
    };
    let result = quote(zip, &spec, &table);
    if let Some(err) = result.error {
        eprintln!("cannot quote {}: {:?}", zip, err);
        println!("{}", serde_json::to_string_pretty(&result)?);
        exit(1);
    }

    // ─── 5) addons + breakdown ───────────────────────────────────────
    let addons = match args.get(5) {
        Some(path) => load_addons(path)?,
        None => AddonsFile::default(),
    };
    let breakdown = CostBreakdown::compute(result.base_price, &addons.surcharges, &addons.taxes);

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "quote": result,
            "breakdown": breakdown,
        }))?
    );
    Ok(())
}

/// Dimensions come in as `HxWxD` in cm, e.g. `40x30x20`.
fn parse_dims(raw: &str) -> Result<(f64, f64, f64)> {
    let parts: Vec<&str> = raw.split('x').collect();
    if parts.len() != 3 {
        bail!("dimensions must be HxWxD in cm, got {:?}", raw);
    }
    let mut dims = [0.0f64; 3];
    for (slot, part) in dims.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .with_context(|| format!("bad dimension {:?} in {:?}", part, raw))?;
    }
    Ok((dims[0], dims[1], dims[2]))
}

fn load_addons(path: &str) -> Result<AddonsFile> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read addons file: {}", path))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse addons file: {}", path))
}
