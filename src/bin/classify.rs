use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use shapesense::detection::{DEFAULT_EPSILON, DEFAULT_THRESHOLD};
use shapesense::logging::init_tracing;
use shapesense::{ChannelOrder, ClassifierParams, ShapeClassifier};

#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Classify the dominant shape in an image file")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Intensities strictly above this are foreground
    #[arg(long, env = "THRESHOLD_BINARY", default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Approximation tolerance as a fraction of the contour perimeter
    #[arg(long, env = "APPROX_POLY_DP_EPSILON", default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Sample order of the decoded pixels (files decode as rgb)
    #[arg(long, value_enum, default_value_t = ChannelOrder::Rgb)]
    channel_order: ChannelOrder,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save every pipeline stage to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Cli::parse();

    init_tracing(if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    });

    anyhow::ensure!(
        args.epsilon.is_finite() && args.epsilon > 0.0,
        "--epsilon must be a positive finite number, got {}",
        args.epsilon
    );

    let img = ImageReader::open(&args.image_path)
        .with_context(|| format!("Failed to open {}", args.image_path.display()))?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

    let mut classifier = ShapeClassifier::new(ClassifierParams {
        threshold: args.threshold,
        epsilon: args.epsilon,
        channel_order: args.channel_order,
    });
    if let Some(debug_dir) = args.debug_out {
        classifier = classifier.with_debug(debug_dir)?;
    }

    let result = classifier.classify(img.to_rgb8())?;

    println!("{}", result.label);
    if args.verbose {
        let params = classifier.params();
        println!(
            "  threshold: {}, epsilon: {}, channel order: {}",
            params.threshold, params.epsilon, params.channel_order
        );
        println!("  contours: {}", result.contour_count);
        if let (Some(vertices), Some(perimeter)) = (result.vertex_count, result.perimeter) {
            println!("  vertices: {}", vertices);
            println!("  perimeter: {:.1}", perimeter);
        }
    }

    Ok(())
}
