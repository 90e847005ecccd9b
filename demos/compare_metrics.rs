//! Compare CIE76 and CIEDE2000 distances to every season reference
//!
//! Reads hex skin colors from the command line and prints a markdown table
//! per color, flagging samples where the two metrics pick different seasons.
//! Usage: cargo run --example compare_metrics -- "#E0AC8A" "#8D5524"

use scan_seasons::color::ColorConverter;
use scan_seasons::{DistanceMetric, SeasonClassifier};
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <hex> [hex...]", args[0]);
        eprintln!("Example: {} \"#E0AC8A\" \"#8D5524\"", args[0]);
        process::exit(1);
    }

    let converter = ColorConverter::new();
    let classifier = SeasonClassifier::new();
    let mut disagreements = 0;

    for hex in &args[1..] {
        let lab = match converter.hex_to_lab(hex) {
            Ok(lab) => lab,
            Err(e) => {
                eprintln!("Skipping {}: {}", hex, e);
                continue;
            }
        };

        println!("## {} (L* {:.2}, a* {:.2}, b* {:.2})", hex, lab.l, lab.a, lab.b);
        println!();
        println!("| Season | ΔE76 | ΔE2000 |");
        println!("|--------|------|--------|");
        for row in classifier.compare_metrics(lab) {
            println!("| {} | {:.2} | {:.2} |", row.season, row.cie76, row.ciede2000);
        }

        let (by_cie76, _) = classifier.nearest_by(lab, DistanceMetric::Cie76);
        let (by_ciede2000, _) = classifier.nearest_by(lab, DistanceMetric::Ciede2000);
        println!();
        println!("Bucket: {}", classifier.bucket(lab));
        if by_cie76 == by_ciede2000 {
            println!("Nearest reference: {}", by_cie76);
        } else {
            disagreements += 1;
            println!("Nearest reference: {} (ΔE76) vs {} (ΔE2000)", by_cie76, by_ciede2000);
        }
        println!();
    }

    eprintln!("{} of {} colors disagree between metrics", disagreements, args.len() - 1);
}
