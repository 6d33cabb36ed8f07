//! # lattice4j native library builder
//!
//! Drives the CMake build of the native lattice library and stages the
//! produced artifacts into the JVM package trees. Run from `jvm-packages/`.
//!
//! ## Usage
//!
//! ```bash
//! builder build                  # Configure + compile + stage
//! builder build --use-cuda ON    # Same, for the CUDA variant
//! builder configure              # Configure + compile only
//! builder stage                  # Copy artifacts and test data only
//! builder status                 # Show which outputs are present
//! builder clean                  # Remove build directories
//! builder doctor                 # Check required external tools
//! ```

use clap::Parser;

mod builder;

#[derive(Parser)]
#[command(name = "builder", about = "lattice4j native library builder")]
struct Cli {
    #[command(subcommand)]
    command: builder::BuildCommands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = builder::dispatch(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(builder::util::exit_code(&err));
    }
}
