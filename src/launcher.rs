//! Location and execution of the Tailwind CSS standalone CLI.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{anyhow, Context};
use tokio::process::Command;
use tracing::{debug, info, instrument, trace};

use crate::acquire::acquire;
use crate::config::Config;
use crate::install::{ExecutableProbe, Installation, VersionProbe};
use crate::platform::Os;
use crate::release::{DownloadTarget, Releases};
use crate::version::resolve_version;
use crate::Result;

/// Tailwind CSS executable to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// Executable found on the `PATH`
    OnPath(PathBuf),

    /// Executable from the local installation
    Installed { dir: PathBuf, path: PathBuf },
}

impl Executable {
    pub fn path(&self) -> &Path {
        match self {
            Self::OnPath(path) | Self::Installed { path, .. } => path,
        }
    }
}

/// Looks for an executable in the given search path (formatted like the `PATH` environment variable).
#[instrument(level = "debug", ret(level = "debug"))]
pub fn find_on_path(executable_name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(executable_name, search_path, cwd).ok()
}

/// Returns a new value for the `PATH` environment variable with `dir` prepended to `current`.
pub fn prepend_to_path(os: Os, dir: &Path, current: Option<&OsStr>) -> OsString {
    let mut path = dir.as_os_str().to_os_string();
    if let Some(current) = current.filter(|current| !current.is_empty()) {
        path.push(os.path_list_separator());
        path.push(current);
    }
    path
}

/// Runs the given executable, forwarding our standard streams to it, and waits for it to exit.
///
/// If the executable comes from the local installation, its directory is prepended to the
/// child's `PATH`.
#[instrument(skip_all, fields(executable = %executable.path().display(), ?os))]
pub async fn launch(
    executable: &Executable,
    args: &[OsString],
    os: Os,
    current_path: Option<&OsStr>,
) -> Result<ExitStatus> {
    trace!(?args);

    let mut command = Command::new(executable.path());
    command.args(args);
    if let Executable::Installed { dir, .. } = executable {
        command.env("PATH", prepend_to_path(os, dir, current_path));
    }

    let status = command
        .status()
        .await
        .with_context(|| format!("failed to run {}", executable.path().display()))?;
    debug!(%status);

    Ok(status)
}

/// Finds or installs Tailwind CSS, then runs it.
#[derive(Debug)]
pub struct Launcher<P = ExecutableProbe> {
    config: Config,
    releases: Releases,
    probe: P,
}

impl Launcher {
    /// Creates a new [`Launcher`] that probes installed versions by running them.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_probe(config, ExecutableProbe)
    }
}

impl<P> Launcher<P>
where
    P: VersionProbe + Sync,
{
    /// Creates a new [`Launcher`] using the given [`VersionProbe`].
    pub fn with_probe(config: Config, probe: P) -> Result<Self> {
        let releases = Releases::new(&config)?;
        Ok(Self { config, releases, probe })
    }

    /// Runs Tailwind CSS with the given arguments and returns its exit status.
    pub async fn run(&self, args: &[OsString]) -> Result<ExitStatus> {
        let executable = self.resolve_executable().await?;

        launch(&executable, args, self.config.platform.os, self.config.search_path.as_deref()).await
    }

    /// Determines which executable to run, installing Tailwind CSS if needed.
    ///
    /// An executable on the `PATH` always wins; in that case, neither the network nor
    /// the local installation is touched.
    #[instrument(skip(self), ret(level = "debug"))]
    pub async fn resolve_executable(&self) -> Result<Executable> {
        let executable_name = self.config.executable_name();
        if let Some(path) = find_on_path(&executable_name, self.config.search_path.as_deref()) {
            return Ok(Executable::OnPath(path));
        }
        info!("{executable_name} not found on PATH, looking for a local installation");

        let home_dir = self
            .config
            .home_dir
            .as_deref()
            .ok_or_else(|| anyhow!("unable to determine user home directory"))?;
        let installation = Installation::new(home_dir, &executable_name);

        let dir = self
            .install(&installation)
            .await
            .with_context(|| "unable to find or download Tailwind CSS")?;

        Ok(Executable::Installed { dir, path: installation.executable().to_path_buf() })
    }

    async fn install(&self, installation: &Installation) -> Result<PathBuf> {
        let version_override = self.config.version_override.as_deref();

        if installation.exists().await {
            let version = resolve_version(&self.releases, version_override).await?;
            if installation.is_current(&self.probe, &version).await {
                debug!("Tailwind CSS {version} already installed in {}", installation.dir().display());
                return Ok(installation.dir().to_path_buf());
            }
            info!("Installed Tailwind CSS is not {version}, updating");
        }

        acquire(
            &self.releases,
            installation,
            &DownloadTarget::new(version_override),
            &self.config.platform,
        )
        .await
    }
}
