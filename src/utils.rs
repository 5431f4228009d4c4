//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the basket demo
#[derive(Debug, Parser)]
pub struct DemoBasketArgs {
    /// Fixture set to load the catalogs and carts from
    #[clap(short, long, default_value = "mcdonalds")]
    pub fixture: String,

    /// Cart to optimize; every cart in the set when omitted
    #[clap(short, long)]
    pub cart: Option<String>,

    /// Optimizer configuration file (YAML)
    #[clap(short = 'C', long)]
    pub config: Option<PathBuf>,
}
