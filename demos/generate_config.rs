//! Generate the default engine configuration file
//!
//! Creates a JSON config with all default thresholds, curves and references

use scan_seasons::EngineConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/engine.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = EngineConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            let q = &config.quality;
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Classification: warm b* >= {:.1}, light L* >= {:.1}, metric {:?}",
                config.classification.warm_b_threshold,
                config.classification.light_l_threshold,
                config.classification.metric
            );
            eprintln!(
                "  Weights: size {:.2}, position {:.2}, brightness {:.2}, sharpness {:.2}",
                q.weights.face_size, q.weights.face_position, q.weights.brightness, q.weights.sharpness
            );
            eprintln!(
                "  Acceptance: overall {:.2}, brightness {:.2}, size {:.2}, position {:.2}",
                q.acceptance.min_overall,
                q.acceptance.min_brightness,
                q.acceptance.min_face_size,
                q.acceptance.min_face_position
            );
            eprintln!(
                "  Face area band: {:.0}%-{:.0}% (zero at {:.0}%)",
                q.curves.face_area_min_ratio * 100.0,
                q.curves.face_area_max_ratio * 100.0,
                q.curves.face_area_cutoff_ratio * 100.0
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
