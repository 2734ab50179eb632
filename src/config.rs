//! Runtime configuration, read once from the environment at startup.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::platform::Platform;

pub const VERSION_ENV_VAR_NAME: &str = "TAILWINDCSS_VERSION";
pub const DEBUG_ENV_VAR_NAME: &str = "TAILWINDCSS_LAUNCHER_DEBUG";
pub const GITHUB_TOKEN_ENV_VAR_NAMES: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://github.com";

/// Configuration of the launcher.
///
/// Use [`from_env`](Config::from_env) to build the configuration for the current process.
/// The base URLs should only be changed to test against a local endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pinned Tailwind CSS version, if any (see [`VERSION_ENV_VAR_NAME`])
    pub version_override: Option<String>,

    /// Whether debug logging has been requested (see [`DEBUG_ENV_VAR_NAME`])
    pub debug: bool,

    /// User's home directory; only required if Tailwind CSS is not on the `PATH`
    pub home_dir: Option<PathBuf>,

    /// Value of the `PATH` environment variable
    pub search_path: Option<OsString>,

    /// Platform used to pick release artifacts, executable name and `PATH` separator
    pub platform: Platform,

    /// Token used to authenticate GitHub API requests, if any
    pub github_token: Option<String>,

    pub api_base_url: String,
    pub download_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            version_override: non_empty_var(VERSION_ENV_VAR_NAME),
            debug: env::var_os(DEBUG_ENV_VAR_NAME).is_some(),
            home_dir: dirs::home_dir(),
            search_path: env::var_os("PATH"),
            platform: Platform::current(),
            github_token: GITHUB_TOKEN_ENV_VAR_NAMES
                .iter()
                .find_map(|name| non_empty_var(name)),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.into(),
        }
    }

    /// Name of the Tailwind CSS executable on our platform.
    pub fn executable_name(&self) -> String {
        self.platform.os.executable_name()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
