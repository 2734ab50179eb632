//! Error types used by the [`tailwindcss-launcher`](crate) program.

/// Error type used by the [`tailwindcss-launcher`](crate) program.
///
/// Currently mapped to [`anyhow::Error`].
pub type Error = anyhow::Error;

/// Result type used by the [`tailwindcss-launcher`](crate) program.
///
/// Currently mapped to [`anyhow::Result`] in order to use our [`Error`] type.
pub type Result<T> = anyhow::Result<T>;
