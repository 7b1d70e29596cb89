// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::{EngineArgs, DEFAULT_IMAGE_PATH};
use crate::vision::ocr::{save_predictions, OcrEngine, PaddleOcrEngine, DEFAULT_OUTPUT_DIR};
use crate::vision::OcrAdapter;
use std::sync::Arc;

/// Image OCR CLI
#[derive(Parser, Debug)]
#[command(name = "ocr-cli")]
#[command(version)]
#[command(about = "Run the OCR pipeline on a single image", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the simplified OCR result as JSON
    Recognize(RecognizeArgs),

    /// Write the engine's raw predictions as JSON files
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
pub struct RecognizeArgs {
    /// Image to recognize
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    pub image: PathBuf,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Image to recognize
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    pub image: PathBuf,

    /// Directory receiving `<image stem>_res.json`
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

/// Execute CLI command
///
/// Each invocation builds its own engine; nothing is shared with a running
/// server.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.engine.to_engine_config();
    let engine = PaddleOcrEngine::new(&config).with_context(|| {
        format!(
            "Failed to initialize OCR engine from {}",
            config.model_dir.display()
        )
    })?;

    match cli.command {
        Commands::Recognize(args) => recognize(Arc::new(engine), args),
        Commands::Dump(args) => dump(&engine, args),
    }
}

pub fn recognize(engine: Arc<dyn OcrEngine>, args: RecognizeArgs) -> Result<()> {
    let result = OcrAdapter::new(engine)
        .recognize(&args.image)
        .with_context(|| format!("OCR failed for {}", args.image.display()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn dump(engine: &dyn OcrEngine, args: DumpArgs) -> Result<()> {
    let written = save_predictions(engine, &args.image, &args.output_dir)
        .with_context(|| format!("Failed to dump predictions for {}", args.image.display()))?;

    for path in &written {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
