//! External tool checks.

use anyhow::{bail, Result};

const REQUIRED_TOOLS: &[&str] = &["cmake", "python3"];

/// Check that every external tool the build shells out to is in PATH.
pub fn run() -> Result<()> {
    let mut ok = true;

    for tool in REQUIRED_TOOLS {
        if which::which(tool).is_err() {
            eprintln!("[FAIL] missing `{tool}` in PATH");
            ok = false;
        } else {
            eprintln!("[OK] {tool}");
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}
