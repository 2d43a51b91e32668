use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use heat_render::{load_weights, Colormap};

mod app;
mod export;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect a neural-network weight tensor as a false-color heatmap")]
struct Cli {
    /// Input weights file
    input: PathBuf,
    /// Colormap preset for the heatmap
    #[arg(long, value_enum, default_value = "viridis")]
    colormap: ColormapPreset,
    /// Initial pixels-per-cell zoom
    #[arg(long, default_value_t = 4.0)]
    scale: f32,
    /// Write the heatmap to a PNG and exit instead of opening a window
    #[arg(long)]
    export: Option<PathBuf>,
    /// Integer nearest-neighbor upscale factor applied to --export output
    #[arg(long, default_value_t = 1)]
    export_scale: u32,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColormapPreset {
    Viridis,
    Inferno,
    Grayscale,
}

impl ColormapPreset {
    fn to_colormap(self) -> Colormap {
        match self {
            ColormapPreset::Viridis => Colormap::Viridis,
            ColormapPreset::Inferno => Colormap::Inferno,
            ColormapPreset::Grayscale => Colormap::Grayscale,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let tensor = load_weights(&cli.input)
        .with_context(|| format!("failed to read weights {:?}", cli.input))?;
    let colormap = cli.colormap.to_colormap();

    if let Some(output) = cli.export {
        return export::write_png(&tensor, colormap, &output, cli.export_scale);
    }

    let title = format!("heat_view : {}", tensor.name);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(title.clone()),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(app::ViewerApp::new(tensor, colormap, cli.scale)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start viewer window: {err}"))
}
