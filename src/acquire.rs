//! Download of the Tailwind CSS standalone CLI into the local installation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures::StreamExt;
use reqwest::Response;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, trace};

use crate::install::Installation;
use crate::platform::Platform;
use crate::release::{DownloadTarget, Releases};
use crate::Result;

/// Extension of the file the artifact is downloaded to before being moved in place.
pub const DOWNLOAD_TEMP_EXTENSION: &str = "download";

/// Downloads the Tailwind CSS release artifact for the given target and platform
/// into the local installation, replacing any existing executable.
///
/// The artifact is first downloaded to a temporary file next to the executable, then
/// moved in place once complete, so a failed download never replaces a previous copy.
///
/// Returns the installation directory.
#[instrument(skip_all, fields(%platform, ?target))]
pub async fn acquire(
    releases: &Releases,
    installation: &Installation,
    target: &DownloadTarget,
    platform: &Platform,
) -> Result<PathBuf> {
    create_install_directory(installation.dir()).await?;

    let url = releases.download_url(target, platform);
    info!("Downloading Tailwind CSS from {url} to {}", installation.executable().display());
    let response = releases
        .get_artifact(&url)
        .await
        .with_context(|| "failed to download Tailwind CSS")?;

    let temp_path = installation
        .executable()
        .with_extension(DOWNLOAD_TEMP_EXTENSION);
    trace!(temp_path = %temp_path.display());

    if let Err(err) = save_artifact(response, &temp_path).await {
        if let Err(remove_err) = fs::remove_file(&temp_path).await {
            debug!("failed to remove partial download {}: {remove_err}", temp_path.display());
        }
        return Err(err);
    }

    fs::rename(&temp_path, installation.executable())
        .await
        .with_context(|| {
            format!(
                "failed to move downloaded file from {} to {}",
                temp_path.display(),
                installation.executable().display()
            )
        })?;

    info!("Tailwind CSS installed in {}", installation.dir().display());
    Ok(installation.dir().to_path_buf())
}

#[instrument(level = "trace")]
async fn create_install_directory(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);

    builder
        .create(dir)
        .await
        .with_context(|| format!("failed to create install directory {}", dir.display()))
}

#[instrument(level = "debug", skip(response))]
async fn save_artifact(response: Response, destination_path: &Path) -> Result<()> {
    let destination_file = fs::File::create(destination_path)
        .await
        .with_context(|| format!("failed to create local file {}", destination_path.display()))?;
    let mut destination_file = BufWriter::new(destination_file);

    let mut bytes_stream = response.bytes_stream();
    let mut size = 0;
    while let Some(bytes) = bytes_stream.next().await {
        let bytes = bytes.with_context(|| "failed to download Tailwind CSS")?;
        destination_file.write_all(&bytes).await.with_context(|| {
            format!("failed to write data to file {}", destination_path.display())
        })?;
        size += bytes.len();
    }

    destination_file.flush().await.with_context(|| {
        format!("failed to flush data to file {}", destination_path.display())
    })?;
    debug!(size, "download complete");

    make_executable(destination_path).await
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, Permissions::from_mode(0o775))
        .await
        .with_context(|| format!("failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
