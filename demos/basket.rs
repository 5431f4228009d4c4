//! Basket Example
//!
//! This example optimizes the carts of a fixture set and prints the options
//! for each one.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to optimize a single cart from the set
//! Use `-C` to load an optimizer configuration file

use std::{io, time::Instant};

use anyhow::Result;

use clap::Parser;
use mealdeal::{
    config::OptimizerConfig, fixtures::Fixture, receipt::write_options, utils::DemoBasketArgs,
};

/// Basket Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = DemoBasketArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;

    let config = match args.config.as_deref() {
        Some(path) => OptimizerConfig::from_path(path)?,
        None => OptimizerConfig::default(),
    };

    let optimizer = fixture.optimizer().with_config(config);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for named in fixture.carts() {
        if args.cart.as_deref().is_some_and(|cart| cart != named.name) {
            continue;
        }

        let start = Instant::now();
        let optimization = optimizer.optimize(&named.cart)?;
        let elapsed = start.elapsed().as_secs_f32();

        println!("\n== {} ==", named.name);

        write_options(&mut handle, &optimization.options, optimization.baseline)?;

        println!(
            "Best: {} ({} nodes{}, {elapsed}s)",
            optimization.best,
            optimization.nodes,
            if optimization.exhausted {
                ", budget exhausted"
            } else {
                ""
            }
        );
    }

    Ok(())
}
