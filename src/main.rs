use std::io;

use anyhow::Context;
use log::info;

use marks_predictor::{config::Config, shell::Shell, store::FileModelStore};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load().context("failed to load the configuration")?;
    info!(
        "dataset at {}, weights at {}",
        config.dataset_path.display(),
        config.weights_path.display()
    );

    let store = FileModelStore::new(&config.weights_path);
    let mut shell = Shell::new(
        io::stdin().lock(),
        io::stdout(),
        store,
        config.kernel(),
        config.dataset_path.clone(),
    );

    shell.run().context("interactive session failed")
}
