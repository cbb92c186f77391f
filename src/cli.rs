// cli.rs - Command-line interface configuration
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "native-canvas")]
#[command(about = "Browser-canvas compatibility shim over a native window", long_about = None)]
pub struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = "native-canvas")]
    pub title: String,

    /// Enable vsync (swap interval 1)
    #[arg(long, default_value_t = false)]
    pub vsync: bool,
}
