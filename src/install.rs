//! Inspection of the local Tailwind CSS installation.
//!
//! Tailwind CSS is installed in a single, well-known directory under the user's home
//! directory (see [`INSTALL_DIR_NAME`]). There is no record of which version is installed;
//! instead, the installed executable is asked to report its own version.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, instrument, trace};

pub const INSTALL_DIR_NAME: &str = ".tailwindcss";

/// Ability to ask an executable to report its version.
#[async_trait]
pub trait VersionProbe {
    /// Returns the first line the executable outputs when run without arguments,
    /// or `None` if it could not be run successfully.
    async fn version_banner(&self, executable: &Path) -> Option<String>;
}

/// [`VersionProbe`] that actually runs the executable.
#[derive(Debug, Default, Copy, Clone)]
pub struct ExecutableProbe;

#[async_trait]
impl VersionProbe for ExecutableProbe {
    #[instrument(level = "debug", skip(self), ret(level = "debug"))]
    async fn version_banner(&self, executable: &Path) -> Option<String> {
        let output = match Command::new(executable)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                debug!("failed to run {}: {err}", executable.display());
                return None;
            },
        };

        if !output.status.success() {
            debug!("{} exited with {}", executable.display(), output.status);
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(Into::into)
    }
}

/// Location of the local Tailwind CSS installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    dir: PathBuf,
    executable: PathBuf,
}

impl Installation {
    /// Returns the installation location for the given home directory and executable name.
    pub fn new(home_dir: &Path, executable_name: &str) -> Self {
        let dir = home_dir.join(INSTALL_DIR_NAME);
        let executable = dir.join(executable_name);
        Self { dir, executable }
    }

    /// Directory containing the executable.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path to the executable.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[instrument(level = "trace", skip(self), fields(executable = %self.executable.display()), ret(level = "trace"))]
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.executable).await.is_ok()
    }

    /// Checks whether the installed executable reports the given version.
    ///
    /// The check is a substring match on the executable's first line of output,
    /// so banners like `≈ tailwindcss v4.0.0` match version `v4.0.0`. An executable
    /// that cannot be run is never current.
    #[instrument(level = "debug", skip(self, probe), ret(level = "debug"))]
    pub async fn is_current<P>(&self, probe: &P, version: &str) -> bool
    where
        P: VersionProbe + Sync + ?Sized,
    {
        match probe.version_banner(&self.executable).await {
            Some(banner) => {
                trace!(%banner);
                banner.contains(version)
            },
            None => false,
        }
    }
}
