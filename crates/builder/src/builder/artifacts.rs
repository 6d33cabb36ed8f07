//! Status and cleanup for generated build outputs.

use crate::builder::native;
use crate::builder::platform::Host;
use anyhow::Result;
use std::path::Path;

/// Report which build outputs are present.
pub fn status() -> Result<()> {
    let host = Host::detect()?;

    println!("Build outputs:\n");
    for dir in [native::build_dir(false), native::build_dir(true)] {
        report(dir, Path::new(dir).is_dir());
    }

    let library = format!("{}/{}", native::LIB_DIR, host.os.library_name());
    report(&library, Path::new(&library).is_file());

    Ok(())
}

fn report(name: &str, present: bool) {
    if present {
        println!("  {name:32} [built]");
    } else {
        println!("  {name:32} [missing]");
    }
}

/// Remove the build directories and the native library output. Absent
/// directories are silently skipped.
pub fn clean() -> Result<()> {
    for dir in [
        native::build_dir(false),
        native::build_dir(true),
        native::LIB_DIR,
    ] {
        let path = Path::new(dir);
        if path.exists() {
            std::fs::remove_dir_all(path)?;
            println!("Cleaned: {dir}");
        }
    }
    Ok(())
}
