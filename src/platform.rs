//! Mapping of the host platform to the naming scheme used by Tailwind CSS release artifacts.

use std::env::consts;
use std::fmt::{Display, Formatter};

/// Base name of the Tailwind CSS standalone CLI executable.
pub const TOOL_NAME: &str = "tailwindcss";

/// Operating system family, as far as release artifacts are concerned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    MacOs,
    Linux,
    Windows,

    /// Any other OS (BSDs, etc.); gets the Windows artifact but keeps Unix naming
    /// for the executable and `PATH`.
    Other,
}

impl Os {
    /// Parses an OS identifier, either as reported by Rust (`macos`) or Go (`darwin`).
    pub fn from_host(os: &str) -> Self {
        match os {
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// Token used for this OS in release artifact names.
    pub fn artifact_token(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Windows | Self::Other => "windows",
        }
    }

    /// Name of the Tailwind CSS executable file on this OS.
    pub fn executable_name(self) -> String {
        match self {
            Self::Windows => format!("{TOOL_NAME}.exe"),
            _ => TOOL_NAME.into(),
        }
    }

    /// Separator used between entries of the `PATH` environment variable.
    pub fn path_list_separator(self) -> &'static str {
        match self {
            Self::Windows => ";",
            _ => ":",
        }
    }
}

/// CPU architecture, as far as release artifacts are concerned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm64,
    X64,
}

impl Arch {
    /// Parses an architecture identifier; anything that isn't 64-bit ARM is considered x64.
    pub fn from_host(arch: &str) -> Self {
        match arch {
            "aarch64" | "arm64" => Self::Arm64,
            _ => Self::X64,
        }
    }
}

/// Platform descriptor used to pick the right release artifact.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Returns the descriptor for the platform we're currently running on.
    pub fn current() -> Self {
        Self::from_host(consts::OS, consts::ARCH)
    }

    /// Builds a descriptor from OS and architecture identifiers.
    ///
    /// Unknown operating systems fall back to the Windows artifact, and only x64
    /// artifacts are published for Windows, so the architecture is ignored on that branch.
    pub fn from_host(os: &str, arch: &str) -> Self {
        match Os::from_host(os) {
            os @ (Os::Windows | Os::Other) => Self { os, arch: Arch::X64 },
            os => Self { os, arch: Arch::from_host(arch) },
        }
    }

    /// Returns the `(os, arch)` tokens used in release artifact names.
    ///
    /// The Windows architecture token embeds the `.exe` extension, since that is
    /// how the artifact is named upstream.
    pub fn artifact_tokens(&self) -> (&'static str, &'static str) {
        let arch = match (self.os, self.arch) {
            (Os::Windows | Os::Other, _) => "x64.exe",
            (_, Arch::Arm64) => "arm64",
            (_, Arch::X64) => "x64",
        };
        (self.os.artifact_token(), arch)
    }

    /// Name of the release artifact for this platform, e.g. `tailwindcss-linux-x64`.
    pub fn artifact_name(&self) -> String {
        let (os, arch) = self.artifact_tokens();
        format!("{TOOL_NAME}-{os}-{arch}")
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (os, arch) = self.artifact_tokens();
        write!(f, "{os}-{arch}")
    }
}

#[cfg(test)]
mod tests {
    mod platform {
        use crate::platform::{Arch, Os, Platform};

        #[test]
        fn test_artifact_tokens() {
            let expectations = [
                ("macos", "aarch64", ("macos", "arm64")),
                ("macos", "x86_64", ("macos", "x64")),
                ("darwin", "arm64", ("macos", "arm64")),
                ("darwin", "amd64", ("macos", "x64")),
                ("linux", "aarch64", ("linux", "arm64")),
                ("linux", "x86_64", ("linux", "x64")),
                ("linux", "riscv64", ("linux", "x64")),
                ("windows", "x86_64", ("windows", "x64.exe")),
                ("windows", "aarch64", ("windows", "x64.exe")),
            ];

            for (os, arch, expected) in expectations {
                assert_eq!(expected, Platform::from_host(os, arch).artifact_tokens(), "{os}/{arch}");
            }
        }

        #[test]
        fn test_unknown_os_downloads_windows_artifact() {
            let platform = Platform::from_host("freebsd", "aarch64");

            assert_eq!(Platform { os: Os::Other, arch: Arch::X64 }, platform);
            assert_eq!(("windows", "x64.exe"), platform.artifact_tokens());
        }

        #[test]
        fn test_unknown_unix_host_keeps_unix_naming() {
            let platform = Platform::from_host("freebsd", "x86_64");

            assert_eq!("tailwindcss", platform.os.executable_name());
            assert_eq!(":", platform.os.path_list_separator());
        }

        #[test]
        fn test_artifact_name() {
            assert_eq!(
                "tailwindcss-linux-arm64",
                Platform::from_host("linux", "aarch64").artifact_name()
            );
            assert_eq!(
                "tailwindcss-windows-x64.exe",
                Platform::from_host("windows", "x86_64").artifact_name()
            );
            assert_eq!("macos-x64", Platform::from_host("macos", "x86_64").to_string());
        }
    }

    mod os {
        use crate::platform::Os;

        #[test]
        fn test_executable_name() {
            assert_eq!("tailwindcss", Os::MacOs.executable_name());
            assert_eq!("tailwindcss", Os::Linux.executable_name());
            assert_eq!("tailwindcss.exe", Os::Windows.executable_name());
            assert_eq!("tailwindcss", Os::Other.executable_name());
        }

        #[test]
        fn test_path_list_separator() {
            assert_eq!(":", Os::MacOs.path_list_separator());
            assert_eq!(":", Os::Linux.path_list_separator());
            assert_eq!(";", Os::Windows.path_list_separator());
            assert_eq!(":", Os::Other.path_list_separator());
        }
    }
}
