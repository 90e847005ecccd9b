//! Command-line quality check for a single frame
//!
//! Scores an image file for face size, position, brightness and sharpness,
//! then classifies a skin color if the frame is acceptable.
//! Set RUST_LOG=scan_seasons=debug to see scoring details.

use scan_seasons::color::hex_to_rgb;
use scan_seasons::{
    AnalysisError, ColorSample, EngineConfig, FaceObservation, NormalizedRect, SeasonAnalyzer,
};
use std::{env, path::Path, process};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help(program: &str) {
    eprintln!("Usage: {} <image> --bbox <x> <y> <w> <h> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bbox x y w h     Face bounding box in normalized coordinates");
    eprintln!("  --skin <hex>       Averaged skin color to classify, e.g. #E0AC8A");
    eprintln!("  --config <file>    Engine configuration JSON");
    eprintln!("  -h, --help         Show this help");
}

fn parse_unit(value: Option<&String>) -> f64 {
    match value.and_then(|v| v.parse::<f64>().ok()) {
        Some(v) => v,
        None => {
            eprintln!("Error: --bbox expects four numbers");
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan_seasons=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut image_path = None;
    let mut bbox = None;
    let mut skin_hex = None;
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bbox" => {
                let x = parse_unit(args.get(i + 1));
                let y = parse_unit(args.get(i + 2));
                let w = parse_unit(args.get(i + 3));
                let h = parse_unit(args.get(i + 4));
                bbox = Some(NormalizedRect::new(x, y, w, h));
                i += 4;
            }
            "--skin" => {
                skin_hex = args.get(i + 1).cloned();
                i += 1;
            }
            "--config" => {
                config_path = args.get(i + 1).cloned();
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") && image_path.is_none() => {
                image_path = Some(arg.to_string());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(image_path) = image_path else {
        print_help(&args[0]);
        process::exit(1);
    };

    let config = match config_path {
        Some(path) => match EngineConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let analyzer = match SeasonAnalyzer::from_config(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let frame = match image::open(&image_path) {
        Ok(image) => image.to_rgb8(),
        Err(e) => {
            eprintln!("Error: cannot open '{}': {}", image_path, e);
            process::exit(1);
        }
    };

    let face = bbox.map(FaceObservation::from_bounding_box);
    let quality = analyzer.assess_image(&frame, face.as_ref());
    match serde_json::to_string_pretty(&quality) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing score: {}", e);
            process::exit(1);
        }
    }

    let Some(hex) = skin_hex else {
        return;
    };
    let skin = match hex_to_rgb(&hex) {
        Ok([r, g, b]) => ColorSample::from_rgb(r, g, b),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match analyzer.analyze(&quality, &skin, None) {
        Ok(result) => println!(
            "Season: {} (confidence {:.2}, next {})",
            result.season, result.confidence, result.next_closest_season
        ),
        Err(e @ AnalysisError::InsufficientQuality { .. }) => {
            eprintln!("{}", e);
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
