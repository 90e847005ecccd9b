//! Classify a Lab skin color into a season
//! Usage: cargo run --example classify_lab -- <L> <a> <b> [--ciede2000]

use scan_seasons::{DistanceMetric, LabColor, SeasonClassifier};
use std::{env, process};

fn parse_component(name: &str, value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            eprintln!("Invalid {} value: {}", name, value);
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 4 || args.len() > 5 {
        eprintln!("Usage: {} <L> <a> <b> [--ciede2000]", args[0]);
        eprintln!("Example: {} 68.0 11.0 16.0", args[0]);
        process::exit(1);
    }

    let lab = LabColor::new(
        parse_component("L", &args[1]),
        parse_component("a", &args[2]),
        parse_component("b", &args[3]),
    );
    let metric = match args.get(4).map(String::as_str) {
        None => DistanceMetric::Cie76,
        Some("--ciede2000") => DistanceMetric::Ciede2000,
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            process::exit(1);
        }
    };

    let result = SeasonClassifier::new().classify_with_metric(lab, None, metric);

    println!("Season:        {}", result.season);
    println!("Confidence:    {:.3}", result.confidence);
    println!(
        "Next closest:  {} (ΔE {:.2}, {:?})",
        result.next_closest_season, result.delta_e_to_next_closest, result.metric
    );
    println!("Nearest ref:   {}", result.nearest_reference_season);
    println!("Display color: {}", lab.to_hex());
}
