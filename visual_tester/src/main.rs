mod annotate;

use anyhow::{Context, Result, bail};
use clap::Parser;
use hue_tracker::core_modules::color_band::ColorBandFilter;
use hue_tracker::core_modules::utils::image_helper::image_helper;
use hue_tracker::{BandControl, FramePipeline, PipelineConfig, TrackingStatus};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Runs the color tracker over still frames and writes annotated copies.
#[derive(Parser, Debug)]
#[command(name = "visual_tester", version, about)]
struct Cli {
    /// Frames to process, in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for annotated output.
    #[arg(short, long, default_value = "tracked")]
    output: PathBuf,

    /// TOML tracker config. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Band override, e.g. `--set hueMin=20` or `--set V_MAX=200`. Repeatable.
    #[arg(long = "set", value_name = "CONTROL=VALUE")]
    overrides: Vec<String>,

    /// Also write the cleaned mask next to each annotated frame.
    #[arg(long)]
    save_mask: bool,

    /// Also write the frame converted to HSV, channels packed as H, S, V.
    #[arg(long)]
    save_hsv: bool,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn parse_override(raw: &str) -> Result<(BandControl, i32)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected CONTROL=VALUE, got `{}`", raw);
    };
    let control: BandControl = name.parse()?;
    let value: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {}", control))?;
    Ok((control, value))
}

fn output_path(dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    dir.join(format!("{}_{}.png", stem, suffix))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --- 1. Logging ---
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // --- 2. Pipeline Initialization ---
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let mut pipeline = FramePipeline::new(config);
    for raw in &cli.overrides {
        let (control, value) = parse_override(raw)?;
        pipeline.set_control(control, value);
        info!(%control, value = pipeline.band().get(control), "Band override");
    }

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    // --- 3. Stop Signal ---
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(true);
        }
    });

    // --- 4. Main Processing Loop ---
    let mut tracked = 0usize;
    for (index, input) in cli.inputs.iter().enumerate() {
        if *stop_rx.borrow() {
            warn!(processed = index, "Stopped by operator");
            break;
        }

        let frame = match image_helper::load_frame(input) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(path = %input.display(), error = %e, "Skipping unreadable frame");
                continue;
            }
        };

        let analysis = pipeline.analyze(&frame);
        let result = &analysis.result;

        info!(
            frame = index,
            path = %input.display(),
            contours = result.contour_count,
            blobs = result.blobs.len(),
            "{}",
            result.status
        );
        for blob in &result.blobs {
            info!(x = blob.centroid_x, y = blob.centroid_y, area = blob.area, "Blob");
        }
        if result.status == TrackingStatus::Tracking {
            tracked += 1;
        }

        // --- 5. Visualization ---
        let annotated = annotate::draw_result(&frame, result);
        image_helper::save_rgb(output_path(&cli.output, input, "tracked"), &annotated)?;
        if cli.save_mask {
            image_helper::save_mask(output_path(&cli.output, input, "mask"), &analysis.mask)?;
        }
        if cli.save_hsv {
            let hsv = ColorBandFilter::new(pipeline.config().hue_scale).hsv_image(&frame);
            image_helper::save_rgb(output_path(&cli.output, input, "hsv"), &hsv)?;
        }
    }

    info!(
        frames = cli.inputs.len(),
        tracked,
        output = %cli.output.display(),
        "Processing complete"
    );
    Ok(())
}
