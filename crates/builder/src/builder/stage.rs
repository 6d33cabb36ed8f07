//! Copies into the JVM module resource trees.
//!
//! Staging is plain filesystem work against two roots: the module tree
//! (`jvm-packages/`, the cwd in production) and the native source root
//! (its parent). Tests exercise the same functions against a temp tree.

use crate::builder::platform::Host;
use crate::builder::util;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// JVM modules receiving the staged files, selected by build variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub lattice4j: &'static str,
    pub lattice4j_spark: &'static str,
}

impl Layout {
    pub fn for_variant(use_cuda: bool) -> Self {
        if use_cuda {
            Self {
                lattice4j: "lattice4j-gpu",
                lattice4j_spark: "lattice4j-spark-gpu",
            }
        } else {
            Self {
                lattice4j: "lattice4j",
                lattice4j_spark: "lattice4j-spark",
            }
        }
    }
}

/// Provenance manifest written next to the staged library.
#[derive(Debug, Serialize)]
struct BuildInfo<'a> {
    library: &'a str,
    os: &'a str,
    arch: &'a str,
    cuda: bool,
}

/// Stage everything: native library, tracker script, test data.
pub fn stage_all(host: Host, use_cuda: bool) -> Result<()> {
    let layout = Layout::for_variant(use_cuda);
    let module_root = Path::new(".");
    let source_root = Path::new("..");

    stage_native_library(module_root, source_root, host, layout, use_cuda)?;
    stage_tracker(module_root, source_root, layout)?;
    stage_test_data(module_root, source_root, layout)?;
    Ok(())
}

/// Copy the produced native library into the core module's resources,
/// under `lib/<os>/<arch>/`, together with a provenance manifest.
pub fn stage_native_library(
    module_root: &Path,
    source_root: &Path,
    host: Host,
    layout: Layout,
    use_cuda: bool,
) -> Result<()> {
    println!("=== Copying native library ===");

    let library = host.os.library_name();
    let dest = module_root
        .join(layout.lattice4j)
        .join("src/main/resources/lib")
        .join(host.os.folder())
        .join(host.arch.folder());
    util::ensure_dir(&dest)?;
    util::copy_file(&source_root.join("lib").join(library), &dest.join(library))?;

    let info = BuildInfo {
        library,
        os: host.os.folder(),
        arch: host.arch.folder(),
        cuda: use_cuda,
    };
    let manifest = dest.join("build-info.json");
    std::fs::write(&manifest, serde_json::to_string_pretty(&info)?)
        .with_context(|| format!("Writing {}", manifest.display()))?;

    Ok(())
}

/// Copy the distributed-training tracker script into the core module's
/// resources.
pub fn stage_tracker(module_root: &Path, source_root: &Path, layout: Layout) -> Result<()> {
    println!("=== Copying distributed tracker ===");

    let dest = module_root.join(layout.lattice4j).join("src/main/resources");
    util::ensure_dir(&dest)?;
    util::copy_file(
        &source_root.join("tracker/lattice_tracker/tracker.py"),
        &dest.join("tracker.py"),
    )
}

/// Copy the demo data files the module tests expect: regression splits into
/// the Spark module, mushroom data into both modules.
pub fn stage_test_data(module_root: &Path, source_root: &Path, layout: Layout) -> Result<()> {
    println!("=== Copying train/test files ===");

    let spark_resources = module_root
        .join(layout.lattice4j_spark)
        .join("src/test/resources");
    util::ensure_dir(&spark_resources)?;

    let splits = source_root.join("demo/regression/housing.txt.t*");
    util::glob_copy(splits.to_string_lossy().as_ref(), &spark_resources)?;

    let mushroom = source_root.join("demo/data/mushroom.*");
    util::glob_copy(mushroom.to_string_lossy().as_ref(), &spark_resources)?;

    let core_resources = module_root.join(layout.lattice4j).join("src/test/resources");
    util::ensure_dir(&core_resources)?;
    util::glob_copy(mushroom.to_string_lossy().as_ref(), &core_resources)?;

    Ok(())
}
