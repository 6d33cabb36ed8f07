//! CMake option map for the native build.
//!
//! The option set is fixed; only the values move. Resolution applies, in
//! order: base defaults, the platform override, environment presence, then
//! explicit CLI flags. Later steps win.

use crate::builder::platform::HostOs;
use clap::ValueEnum;
use std::fmt;

/// An ON/OFF build option value, parsed exactly as `ON` or `OFF`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    #[value(name = "ON")]
    On,

    #[value(name = "OFF")]
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::On => f.write_str("ON"),
            Toggle::Off => f.write_str("OFF"),
        }
    }
}

/// CMake options controlling optional features of the native build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    pub use_openmp: bool,
    pub use_hdfs: bool,
    pub use_azure: bool,
    pub use_s3: bool,
    pub use_cuda: bool,
    pub use_nccl: bool,
    pub jvm_bindings: bool,
    pub log_capi_invocation: bool,
    pub mock_collective: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            use_openmp: true,
            use_hdfs: false,
            use_azure: false,
            use_s3: false,
            use_cuda: false,
            use_nccl: false,
            jvm_bindings: true,
            log_capi_invocation: false,
            mock_collective: false,
        }
    }
}

impl BuildConfig {
    /// Resolve the option map from the host platform, environment presence
    /// and CLI flags.
    pub fn resolve(
        host_os: HostOs,
        use_cuda: Toggle,
        log_capi_invocation: Toggle,
        mock_collective_env: bool,
    ) -> Self {
        let mut config = Self::default();

        if host_os == HostOs::MacOs {
            // The default Apple toolchain has no OpenMP support
            config.use_openmp = false;
        }

        if mock_collective_env {
            config.mock_collective = true;
        }

        if log_capi_invocation.is_on() {
            config.log_capi_invocation = true;
        }

        if use_cuda.is_on() {
            config.use_cuda = true;
            config.use_nccl = true;
        }

        config
    }

    /// Render the option map as `-D<KEY>:BOOL=<ON|OFF>` configure arguments,
    /// in a stable order.
    pub fn cmake_defines(&self) -> Vec<String> {
        [
            ("USE_OPENMP", self.use_openmp),
            ("USE_HDFS", self.use_hdfs),
            ("USE_AZURE", self.use_azure),
            ("USE_S3", self.use_s3),
            ("USE_CUDA", self.use_cuda),
            ("USE_NCCL", self.use_nccl),
            ("JVM_BINDINGS", self.jvm_bindings),
            ("LOG_CAPI_INVOCATION", self.log_capi_invocation),
            ("MOCK_COLLECTIVE", self.mock_collective),
        ]
        .iter()
        .map(|(key, value)| format!("-D{key}:BOOL={}", onoff(*value)))
        .collect()
    }
}

fn onoff(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Extra configure arguments from `GPU_ARCH_FLAGS`, passed through verbatim
/// (split on whitespace, unvalidated). Absent means none.
pub fn gpu_arch_args(value: Option<&str>) -> Vec<String> {
    value
        .map(|flags| flags.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
