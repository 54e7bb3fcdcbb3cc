// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid options: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("HTML serialization failed")]
    Format(#[from] std::fmt::Error),

    /// Headless browser failures, kept as text because the browser crate
    /// reports them as `anyhow::Error`.
    #[error("browser error: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, Error>;
