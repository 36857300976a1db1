// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "soft-canvas")]
#[command(about = "Software 2D canvas demo", long_about = None)]
pub struct Cli {
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// 24-bit BMP sprite blitted at the pointer each frame
    #[arg(long)]
    pub sprite: Option<PathBuf>,
}
