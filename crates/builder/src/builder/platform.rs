//! Host platform tables for the native library artifact.
//!
//! The staged resource layout is `lib/<os>/<arch>/<library>`; both folder
//! names and the library filename come from these tables. Unsupported
//! platforms are an error naming the offending string, not a panic.

use anyhow::{bail, Result};

/// Operating systems the packaging tree supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    Solaris,
}

impl HostOs {
    /// Detect the running operating system.
    pub fn detect() -> Result<Self> {
        Self::from_name(std::env::consts::OS)
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            "solaris" => Self::Solaris,
            other => bail!("Unsupported operating system: {other}"),
        })
    }

    /// Filename the native build produces for this OS.
    pub fn library_name(self) -> &'static str {
        match self {
            Self::Linux | Self::Solaris => "liblattice4j.so",
            Self::MacOs => "liblattice4j.dylib",
            Self::Windows => "lattice4j.dll",
        }
    }

    /// Resource folder under `lib/`.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Solaris => "solaris",
        }
    }
}

/// Machine architectures the packaging tree supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostArch {
    X86_64,
    Aarch64,
    Sparc,
}

impl HostArch {
    /// Detect the running machine architecture.
    pub fn detect() -> Result<Self> {
        Self::from_machine(std::env::consts::ARCH)
    }

    /// Accepts the machine names the supported platforms report:
    /// `x86_64` (Linux/macOS), `amd64` (Windows), `i86pc`/`sun4v` (Solaris),
    /// `arm64` (macOS/Windows), `aarch64`.
    pub fn from_machine(machine: &str) -> Result<Self> {
        Ok(match machine.to_lowercase().as_str() {
            "x86_64" | "amd64" | "i86pc" => Self::X86_64,
            "arm64" | "aarch64" => Self::Aarch64,
            "sun4v" => Self::Sparc,
            other => bail!("Unsupported machine architecture: {other}"),
        })
    }

    /// Resource folder under `lib/<os>/`.
    pub fn folder(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::Sparc => "sparc",
        }
    }
}

/// Detected host platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Host {
    pub os: HostOs,
    pub arch: HostArch,
}

impl Host {
    pub fn detect() -> Result<Self> {
        Ok(Self {
            os: HostOs::detect()?,
            arch: HostArch::detect()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_names() {
        assert_eq!(HostOs::Linux.library_name(), "liblattice4j.so");
        assert_eq!(HostOs::Solaris.library_name(), "liblattice4j.so");
        assert_eq!(HostOs::MacOs.library_name(), "liblattice4j.dylib");
        assert_eq!(HostOs::Windows.library_name(), "lattice4j.dll");
    }

    #[test]
    fn test_os_folders() {
        assert_eq!(HostOs::Linux.folder(), "linux");
        assert_eq!(HostOs::MacOs.folder(), "macos");
        assert_eq!(HostOs::Windows.folder(), "windows");
        assert_eq!(HostOs::Solaris.folder(), "solaris");
    }

    #[test]
    fn test_os_from_name() {
        assert_eq!(HostOs::from_name("linux").unwrap(), HostOs::Linux);
        assert_eq!(HostOs::from_name("macos").unwrap(), HostOs::MacOs);
        assert_eq!(HostOs::from_name("windows").unwrap(), HostOs::Windows);
        assert_eq!(HostOs::from_name("solaris").unwrap(), HostOs::Solaris);
    }

    #[test]
    fn test_unsupported_os_is_an_error() {
        let err = HostOs::from_name("freebsd").unwrap_err();
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn test_arch_from_machine() {
        assert_eq!(HostArch::from_machine("x86_64").unwrap(), HostArch::X86_64);
        assert_eq!(HostArch::from_machine("amd64").unwrap(), HostArch::X86_64);
        assert_eq!(HostArch::from_machine("i86pc").unwrap(), HostArch::X86_64);
        assert_eq!(HostArch::from_machine("arm64").unwrap(), HostArch::Aarch64);
        assert_eq!(HostArch::from_machine("aarch64").unwrap(), HostArch::Aarch64);
        assert_eq!(HostArch::from_machine("sun4v").unwrap(), HostArch::Sparc);
    }

    #[test]
    fn test_arch_lookup_is_case_insensitive() {
        assert_eq!(HostArch::from_machine("AMD64").unwrap(), HostArch::X86_64);
        assert_eq!(HostArch::from_machine("ARM64").unwrap(), HostArch::Aarch64);
    }

    #[test]
    fn test_arch_folders() {
        assert_eq!(HostArch::X86_64.folder(), "x86_64");
        assert_eq!(HostArch::Aarch64.folder(), "aarch64");
        assert_eq!(HostArch::Sparc.folder(), "sparc");
    }

    #[test]
    fn test_unsupported_arch_is_an_error() {
        let err = HostArch::from_machine("riscv64").unwrap_err();
        assert!(err.to_string().contains("riscv64"));
    }

    #[test]
    fn test_detect_on_this_host() {
        // CI hosts are one of the supported platforms
        let host = Host::detect().unwrap();
        assert!(!host.os.folder().is_empty());
        assert!(!host.arch.folder().is_empty());
    }
}
