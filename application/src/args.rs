//! [`Args`] definitions.

use clap::Parser;

/// Browser-side client of the blog platform.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// URL of the page being loaded.
    ///
    /// Defaults to the configured home route.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Resolve the authentication status with a live session check instead
    /// of the local session storage.
    #[arg(long)]
    pub remote: bool,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
