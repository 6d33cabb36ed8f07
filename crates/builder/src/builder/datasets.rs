//! Regression demo data generation.
//!
//! The Spark module tests consume train/test splits of the regression demo;
//! the demo's own scripts produce them. Non-zero script exit is fatal.

use crate::builder::util::{self, ScopedDir};
use anyhow::Result;
use std::path::Path;

/// Regression demo directory, relative to `jvm-packages/`.
pub const REGRESSION_DIR: &str = "../demo/regression";

/// Generate the regression train/test splits.
pub fn prepare() -> Result<()> {
    println!("=== Preparing demo datasets ===");

    let _guard = ScopedDir::enter(Path::new(REGRESSION_DIR))?;
    util::run("python3", &["prepare.py"])?;
    util::run("python3", &["split.py", "housing.txt", "1"])?;
    Ok(())
}
