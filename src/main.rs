use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use imagevault::acquire::collect_paths;
use imagevault::app::ImageVaultApp;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Stage images in an in-memory gallery with a fullscreen lightbox"
)]
struct Args {
    /// Image files or directories to stage on startup
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Recurse into subdirectories when staging directories
    #[arg(short = 'r', long = "recursive", default_value_t = false)]
    recursive: bool,

    /// Start in fullscreen instead of a window
    #[arg(short = 'f', long, default_value_t = false)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let initial = collect_paths(&args.paths, args.recursive)?;
    let recursive = args.recursive;

    let viewport = if args.fullscreen {
        egui::ViewportBuilder::default().with_fullscreen(true)
    } else {
        egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0])
    };
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "ImageVault",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ImageVaultApp::new(initial, recursive)))),
    )?;

    Ok(())
}
