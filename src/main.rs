//! Main [`tailwindcss_launcher`] program entry point.
//!
//! Simply delegates to the tailwindcss-launcher [`Cli`] wrapper.

use std::process::ExitCode;

use tailwindcss_launcher::Cli;

/// Main program entry point.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    Cli::from_env().execute().await
}
