//! Trains the MLP digit classifier with configuration from the environment.

use micromlp::{config, train};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::from_env()?;
    train::run(&cfg)
}
