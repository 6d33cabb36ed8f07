//! CMake configure + compile of the native library.
//!
//! Runs from `jvm-packages/`; the native source root is the parent
//! directory. Both CMake invocations are blocking and a non-zero exit
//! aborts the whole run.

use crate::builder::config::BuildConfig;
use crate::builder::platform::{Host, HostOs};
use crate::builder::util::{self, ScopedDir};
use anyhow::Result;
use std::path::Path;

/// Native library output directory, relative to `jvm-packages/`.
pub const LIB_DIR: &str = "../lib";

/// Build directory for the selected variant, relative to `jvm-packages/`.
pub fn build_dir(use_cuda: bool) -> &'static str {
    if use_cuda {
        "../build-gpu"
    } else {
        "../build"
    }
}

/// Run the configure and compile steps inside the build directory.
pub fn configure_and_build(host: Host, config: &BuildConfig, extra_args: &[String]) -> Result<()> {
    println!("=== Building native library ===");

    if host.os == HostOs::MacOs {
        let java_home = util::run_capture::<&str>("/usr/libexec/java_home", &[])?;
        std::env::set_var("JAVA_HOME", java_home);
    }

    let build_dir = build_dir(config.use_cuda);
    util::ensure_dir(Path::new(build_dir))?;

    // Outputs from a previous configuration must not reach the copy step
    if Path::new(LIB_DIR).exists() {
        std::fs::remove_dir_all(LIB_DIR)?;
    }

    {
        let _guard = ScopedDir::enter(Path::new(build_dir))?;

        let mut configure: Vec<String> = vec!["..".to_string()];
        configure.extend(config.cmake_defines());
        configure.extend(extra_args.iter().cloned());
        if host.os == HostOs::Windows {
            // Force a 64-bit build
            configure.push("-A".to_string());
            configure.push("x64".to_string());
        }
        util::run("cmake", &configure)?;

        let mut compile: Vec<String> = vec![
            "--build".to_string(),
            ".".to_string(),
            "--config".to_string(),
            "Release".to_string(),
        ];
        if host.os == HostOs::Linux {
            compile.push("--".to_string());
            compile.push("-j".to_string());
            compile.push(cpus());
        }
        util::run("cmake", &compile)?;
    }

    println!("  Built: {}/{}", LIB_DIR, host.os.library_name());
    Ok(())
}

fn cpus() -> String {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dir_per_variant() {
        assert_eq!(build_dir(false), "../build");
        assert_eq!(build_dir(true), "../build-gpu");
    }

    #[test]
    fn test_cpus_is_a_positive_number() {
        let n: usize = cpus().parse().unwrap();
        assert!(n >= 1);
    }
}
