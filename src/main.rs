//! Command-line entry point.
//!
//! Invoked as `skin-classifier <image_path> <model_path> <scaler_path>
//! <mapping_path>`. Prints exactly one JSON document to stdout: the
//! prediction report on a completed run, or a usage-error document when the
//! arguments have the wrong shape. Diagnostics go to stderr via tracing.

use clap::Parser;
use skin_classifier::core::init_tracing;
use skin_classifier::predictor::{PredictionReport, predict_condition};
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str =
    "Usage: skin-classifier <image_path> <model_path> <scaler_path> <mapping_path>";

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "skin-classifier")]
#[command(about = "Classifies the skin condition in an image using pretrained artifacts")]
struct Args {
    /// Path of the image to classify
    image_path: String,

    /// Path of the serialized classifier
    model_path: String,

    /// Path of the serialized feature scaler
    scaler_path: String,

    /// Path of the class-mapping document
    mapping_path: String,
}

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error)
            if matches!(
                error.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            println!("{}", PredictionReport::failure(USAGE).to_json_line());
            return ExitCode::FAILURE;
        }
    };

    let report = predict_condition(
        Path::new(&args.image_path),
        Path::new(&args.model_path),
        Path::new(&args.scaler_path),
        Path::new(&args.mapping_path),
    );
    println!("{}", report.to_json_line());

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
