//! Build orchestration for the lattice4j JVM packages.
//!
//! Structure:
//! - `config` - CMake option map with override precedence
//! - `platform` - host OS/arch tables for library and folder names
//! - `native` - CMake configure + compile of the native library
//! - `datasets` - regression demo data generation
//! - `stage` - copies into the JVM module resource trees
//! - `artifacts` - status/clean for generated outputs
//! - `doctor` - external tool checks

pub mod artifacts;
pub mod config;
pub mod datasets;
pub mod doctor;
pub mod native;
pub mod platform;
pub mod stage;
pub mod util;

use anyhow::Result;
use clap::Subcommand;

use self::config::{BuildConfig, Toggle};
use self::platform::Host;

/// Build commands for the CLI.
#[derive(Subcommand)]
pub enum BuildCommands {
    /// Build everything (configure + compile + stage)
    Build {
        /// Build the CUDA variant of the native library
        #[arg(long = "use-cuda", value_enum, default_value_t = Toggle::Off)]
        use_cuda: Toggle,

        /// Compile C API invocation logging into the library
        #[arg(long = "log-capi-invocation", value_enum, default_value_t = Toggle::Off)]
        log_capi_invocation: Toggle,
    },
    /// Run the CMake configure + compile steps only
    Configure {
        /// Build the CUDA variant of the native library
        #[arg(long = "use-cuda", value_enum, default_value_t = Toggle::Off)]
        use_cuda: Toggle,

        /// Compile C API invocation logging into the library
        #[arg(long = "log-capi-invocation", value_enum, default_value_t = Toggle::Off)]
        log_capi_invocation: Toggle,
    },
    /// Copy the built library, tracker and test data into the module trees
    Stage {
        /// Stage into the CUDA variant modules
        #[arg(long = "use-cuda", value_enum, default_value_t = Toggle::Off)]
        use_cuda: Toggle,
    },
    /// Show which build outputs are present
    Status,
    /// Remove build directories and the native library output
    Clean,
    /// Check that required external tools are installed
    Doctor,
}

pub fn dispatch(command: BuildCommands) -> Result<()> {
    match command {
        BuildCommands::Build {
            use_cuda,
            log_capi_invocation,
        } => build_all(use_cuda, log_capi_invocation),
        BuildCommands::Configure {
            use_cuda,
            log_capi_invocation,
        } => configure(use_cuda, log_capi_invocation),
        BuildCommands::Stage { use_cuda } => {
            datasets::prepare()?;
            stage::stage_all(Host::detect()?, use_cuda.is_on())
        }
        BuildCommands::Status => artifacts::status(),
        BuildCommands::Clean => artifacts::clean(),
        BuildCommands::Doctor => doctor::run(),
    }
}

/// Build everything: configure + compile, prepare datasets, stage artifacts.
pub fn build_all(use_cuda: Toggle, log_capi_invocation: Toggle) -> Result<()> {
    println!("=== Building lattice4j ===\n");

    let host = Host::detect()?;
    configure_and_build(host, use_cuda, log_capi_invocation)?;
    datasets::prepare()?;
    stage::stage_all(host, use_cuda.is_on())?;

    println!("\n=== Build complete ===");
    Ok(())
}

fn configure(use_cuda: Toggle, log_capi_invocation: Toggle) -> Result<()> {
    configure_and_build(Host::detect()?, use_cuda, log_capi_invocation)
}

fn configure_and_build(
    host: Host,
    use_cuda: Toggle,
    log_capi_invocation: Toggle,
) -> Result<()> {
    let mock_collective = std::env::var_os("MOCK_COLLECTIVE").is_some();
    let config = BuildConfig::resolve(host.os, use_cuda, log_capi_invocation, mock_collective);

    let gpu_arch = std::env::var("GPU_ARCH_FLAGS").ok();
    let extra_args = config::gpu_arch_args(gpu_arch.as_deref());

    native::configure_and_build(host, &config, &extra_args)
}
