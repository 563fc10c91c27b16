//! `rawinfer` CLI - run an ONNX model on one image and save the raw output.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rawinfer::{output::format_shape, Config, Pipeline};

/// Run an ONNX model on a single image and write the raw f32 output tensor.
#[derive(Parser, Debug)]
#[command(name = "rawinfer")]
#[command(version, about, long_about = None)]
struct Args {
    /// ONNX model path.
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Input image path.
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Output path for the raw tensor.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Width the image is resized to.
    #[arg(value_name = "WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height the image is resized to.
    #[arg(value_name = "HEIGHT", value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize logging; stdout is reserved for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rawinfer=info,ort=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        width: args.width,
        height: args.height,
    };

    // Decode first so a bad image is reported before the model is loaded
    let tensor = config
        .prepare(&args.image)
        .context("Failed to load image")?;

    let mut pipeline = Pipeline::new(&args.model, config).context("Failed to initialize model")?;

    let report = pipeline
        .process_tensor(&tensor, &args.output)
        .context("Failed to run inference")?;
    drop(tensor);

    println!("Input Name: {}", report.input_name);
    println!("Output Name: {}", report.output_name);
    println!("Output Shape: {}", format_shape(&report.output_shape));

    tracing::info!(
        "Wrote {} values ({} bytes) to {}",
        report.element_count,
        report.bytes_written,
        args.output.display()
    );

    Ok(())
}
