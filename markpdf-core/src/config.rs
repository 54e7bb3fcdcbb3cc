// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Rewrite `\(...\)`, `\[...\]` and bracketed LaTeX into dollar math
    /// before parsing.
    pub preprocess_math: bool,
    /// Keep raw HTML from the source. When off, raw HTML nodes are dropped.
    pub allow_raw_html: bool,
    pub math: MathBackend,
    pub theme: Theme,
    pub pdf: PdfOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            preprocess_math: true,
            allow_raw_html: false,
            math: MathBackend::default(),
            theme: Theme::default(),
            pdf: PdfOptions::default(),
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathBackend {
    /// Converted to MathML at render time.
    #[default]
    MathMl,
    /// Left as TeX for MathJax to typeset in the browser.
    MathJax,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// GitHub base styles plus the print overrides, laid out for an A4 page.
    #[default]
    Print,
    /// Plain GitHub styles in a wide column.
    Github,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PdfOptions {
    pub page_size: PageSize,
    pub landscape: bool,
    pub margin_mm: u32,
    /// Time given to the page for fonts and client-side math before printing.
    pub render_delay_ms: u64,
    pub chrome_path: Option<PathBuf>,
    pub sandbox: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            landscape: false,
            margin_mm: 12,
            render_delay_ms: 500,
            chrome_path: None,
            sandbox: false,
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Paper width and height in inches.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (8.27, 11.69),
            PageSize::Letter => (8.5, 11.0),
        }
    }
}

pub fn load_options_from_yaml_file(path: &Path) -> crate::Result<Options> {
    let content = std::fs::read_to_string(path)?;
    let options = serde_yaml::from_str::<Options>(&content)?;
    Ok(options)
}
