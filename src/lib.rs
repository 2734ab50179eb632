//! Launcher for the [Tailwind CSS](https://tailwindcss.com/) standalone CLI.
//!
//! If `tailwindcss` can be found on the `PATH`, it is run directly. Otherwise, a copy is
//! kept in `~/.tailwindcss`, downloaded from GitHub releases when missing or out of date.
//! All arguments are forwarded to `tailwindcss` as-is, and its exit code becomes ours.
//!
//! Behavior can be adjusted through environment variables:
//!
//! - `TAILWINDCSS_VERSION`: pin a specific release tag (e.g. `v3.4.1`) instead of the latest
//! - `TAILWINDCSS_LAUNCHER_DEBUG`: enable debug logging (`RUST_LOG` is also supported)
//! - `GITHUB_TOKEN` / `GH_TOKEN`: authenticate GitHub API requests

pub mod acquire;
pub mod config;
mod error;
pub mod install;
pub mod launcher;
pub mod platform;
pub mod release;
pub mod version;

use std::env;
use std::ffi::OsString;
use std::process::{ExitCode, ExitStatus};

pub use error::Error;
pub use error::Result;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::launcher::Launcher;

/// Command-line wrapper for the launcher.
#[derive(Debug, Clone)]
pub struct Cli {
    /// Arguments to forward to Tailwind CSS
    pub args: Vec<OsString>,
}

impl Cli {
    /// Collects our own command-line arguments, minus the program name.
    pub fn from_env() -> Self {
        Self { args: env::args_os().skip(1).collect() }
    }

    /// Runs Tailwind CSS and returns the exit code our process should use.
    ///
    /// This is the only place where errors are reported; any failure to find, download
    /// or start Tailwind CSS is logged and results in a failure exit code.
    pub async fn execute(self) -> ExitCode {
        let config = Config::from_env();
        init_tracing(config.debug);

        match self.run(config).await {
            Ok(status) => exit_code(status),
            Err(err) => {
                error!("{err:#}");
                ExitCode::FAILURE
            },
        }
    }

    async fn run(&self, config: Config) -> Result<ExitStatus> {
        Launcher::new(config)?.run(&self.args).await
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { LevelFilter::DEBUG } else { LevelFilter::ERROR };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // Logs must not end up mixed with Tailwind CSS's output.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_code(status: ExitStatus) -> ExitCode {
    if !status.success() {
        error!("tailwindcss exited with {status}");
    }
    ExitCode::from(exit_code_value(status))
}

fn exit_code_value(status: ExitStatus) -> u8 {
    match status.code() {
        Some(0) => 0,
        Some(code) => u8::try_from(code).ok().filter(|&code| code != 0).unwrap_or(1),
        None => 1,
    }
}
